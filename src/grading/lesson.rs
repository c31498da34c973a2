// ============================================================
// Grading Layer — Lesson 262: Text Classification
// ============================================================
// The five exercises of the sentiment-classifier lesson, bound
// as q_1 … q_5:
//
//   q_1  create the text categorizer model     (coding)
//   q_2  write the training loop               (coding)
//   q_3  write predict                         (coding)
//   q_4  write evaluate                        (coding)
//   q_5  how would you optimise the model?     (reflective)
//
// Solution snippets live in solutions/*.rs. They mirror
// ml::factory and ml::reference, which are what the checks run
// as the oracle, and the tests below compile each snippet and
// put it through its own check.

use crate::domain::error::RegistrationError;
use crate::grading::exercise::{CheckKind, CodingExercise, Exercise, ReflectiveExercise};
use crate::grading::registry::{bind_exercises, Lesson};

pub const TUTORIAL_ID: u32 = 262;

pub const VAR_FORMAT: &str = "q_{n}";

const CREATE_MODEL_HINT: &str = "\
After creating the blank model with Language::blank(\"en\"), use add_textcat to add the \
text categorizer. Set the config for exclusive classes and the bow architecture. Then use \
add_label to register NEGATIVE and POSITIVE, in that order.";

const CREATE_MODEL_SOLUTION: &str = include_str!("solutions/create_model.rs");

const TRAIN_HINT: &str = "\
Shuffle train_data with the rng you are given, then use minibatch to cut it into batches. \
Each Batch already holds parallel texts and labels vectors. For training, model.update takes \
the texts, labels, optimizer, dropout and the losses map. Be sure to use a batch size of 8 \
and dropout 0.2.";

const TRAIN_SOLUTION: &str = include_str!("solutions/train.rs");

const PREDICT_HINT: &str = "\
Use model.tokenize on each text to build the docs; it returns a Result, so collect into \
Result<Vec<Doc>, _>. To make predictions, get the text categorizer with \
model.get_pipe(\"textcat\") and call predict on it to get the scores. \
ScoreMatrix::argmax_rows returns the index of the highest score in each row, one per text.";

const PREDICT_SOLUTION: &str = include_str!("solutions/predict.rs");

const EVALUATE_HINT: &str = "\
Use your predict function to get the predicted classes. The labels look like \
{\"cats\": {\"POSITIVE\": true, \"NEGATIVE\": false}}; LabelRecord::true_class turns one \
into 1 where POSITIVE is true and 0 where it is false. Once you have the predictions and \
true classes, the accuracy is the number of matches divided by the number of texts. Return \
LengthMismatch when texts and labels differ in length, and 0.0 when there are no texts.";

const EVALUATE_SOLUTION: &str = include_str!("solutions/evaluate.rs");

const OPTIMIZATION_QUESTION: &str = "\
The model you trained is a starting point. What could you change to get better \
validation accuracy?";

const OPTIMIZATION_ANSWER: &str = "\
Answer: There are various hyperparameters to work with here. The biggest one is the \
TextCategorizer architecture. You used the simplest model which trains faster but likely \
has worse performance than the CNN and ensemble models. You can adjust the dropout \
parameter to reduce overfitting. Also, you can save the model after each training pass \
through the data and use the model with the best validation accuracy.";

/// The lesson's exercises, in order.
pub fn exercises() -> Vec<Exercise> {
    vec![
        Exercise::Coding(CodingExercise {
            title:    "Create the text categorizer model",
            var:      "nlp",
            hint:     CREATE_MODEL_HINT,
            solution: CREATE_MODEL_SOLUTION,
            kind:     CheckKind::CreateModel,
        }),
        Exercise::Coding(CodingExercise {
            title:    "Write the training function",
            var:      "train",
            hint:     TRAIN_HINT,
            solution: TRAIN_SOLUTION,
            kind:     CheckKind::Train,
        }),
        Exercise::Coding(CodingExercise {
            title:    "Write the prediction function",
            var:      "predict",
            hint:     PREDICT_HINT,
            solution: PREDICT_SOLUTION,
            kind:     CheckKind::Predict,
        }),
        Exercise::Coding(CodingExercise {
            title:    "Write the evaluation function",
            var:      "evaluate",
            hint:     EVALUATE_HINT,
            solution: EVALUATE_SOLUTION,
            kind:     CheckKind::Evaluate,
        }),
        Exercise::Reflective(ReflectiveExercise {
            title:    "Model optimization",
            question: OPTIMIZATION_QUESTION,
            solution: OPTIMIZATION_ANSWER,
        }),
    ]
}

/// Bind the lesson as q_1 … q_5.
pub fn bind() -> Result<Lesson, RegistrationError> {
    bind_exercises(TUTORIAL_ID, VAR_FORMAT, exercises())
}
