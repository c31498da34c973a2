fn predict<L: Language>(model: &L, texts: &[String]) -> Result<Vec<usize>, ClassifierError> {
    // Use the tokenizer to tokenize each input text example
    let docs = texts
        .iter()
        .map(|t| model.tokenize(t))
        .collect::<Result<Vec<Doc>, _>>()?;

    // Use textcat to get the scores for each doc
    let textcat = model
        .get_pipe("textcat")
        .ok_or_else(|| ClassifierError::MissingPipe("textcat".into()))?;
    let scores = textcat.predict(&docs)?;

    // From the scores, find the class with the highest score/probability
    Ok(scores.argmax_rows())
}
