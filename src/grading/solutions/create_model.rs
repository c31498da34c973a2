fn create_model<L: Language>() -> Result<L, ModelConstructionError> {
    // Create an empty model
    let mut nlp = L::blank("en")?;

    // Create the TextCategorizer with exclusive classes and "bow" architecture
    let textcat = nlp.add_textcat(TextCatConfig {
        exclusive_classes: true,
        architecture:      Architecture::Bow,
    })?;

    // Add NEGATIVE and POSITIVE labels to text classifier
    textcat.add_label("NEGATIVE")?;
    textcat.add_label("POSITIVE")?;

    Ok(nlp)
}
