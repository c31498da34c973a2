fn train<L: Language>(
    model:      &mut L,
    train_data: &mut [(String, LabelRecord)],
    optimizer:  &mut L::Optimizer,
    batch_size: usize,
    rng:        &mut StdRng,
) -> Result<Losses, ClassifierError> {
    let mut losses = Losses::new();

    // Shuffle the training data
    train_data.shuffle(rng);

    // Create batches with batch size = 8 and update the model with dropout 0.2
    for batch in minibatch(train_data, batch_size) {
        model.update(&batch.texts, &batch.labels, optimizer, 0.2, &mut losses)?;
    }

    Ok(losses)
}
