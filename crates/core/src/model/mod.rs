mod ids;
mod question;
mod result;

pub use ids::{ParseIdError, QuestionIndex};
pub use question::{Question, QuestionError};
pub use result::{AnswerWrite, ResultRecord};
