fn evaluate<L: Language>(
    model:  &L,
    texts:  &[String],
    labels: &[LabelRecord],
) -> Result<f64, ClassifierError> {
    // Every text needs exactly one label
    if texts.len() != labels.len() {
        return Err(ClassifierError::LengthMismatch { texts: texts.len(), labels: labels.len() });
    }

    // Get predictions from textcat model
    let predicted_class = predict(model, texts)?;

    // No texts means nothing was classified correctly
    if texts.is_empty() {
        return Ok(0.0);
    }

    // From labels, get the true class (POSITIVE -> 1, NEGATIVE -> 0)
    let true_class = labels.iter().map(LabelRecord::true_class);

    // The accuracy, number of correct predictions divided by all predictions
    let correct = predicted_class.iter().zip(true_class).filter(|(p, t)| **p == *t).count();
    Ok(correct as f64 / texts.len() as f64)
}
