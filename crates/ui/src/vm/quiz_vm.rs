use quiz_core::model::Question;
use services::{QuizSession, RestrictOutcome, SessionError, SessionPhase};

//
// ─── OPTION & VERDICT ──────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    /// Revealed after confirmation: this option carries the answer text.
    Correct,
    /// Revealed after confirmation: the chosen option was wrong.
    Incorrect,
}

impl OptionState {
    fn resolve(confirmed: bool, selected: bool, correct: bool) -> Self {
        match (confirmed, selected, correct) {
            (true, _, true) => Self::Correct,
            (true, true, false) => Self::Incorrect,
            (false, true, _) => Self::Selected,
            _ => Self::Idle,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "option",
            Self::Selected => "option option--selected",
            Self::Correct => "option option--correct",
            Self::Incorrect => "option option--incorrect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerdictVm {
    pub correct: bool,
    pub answer: String,
}

impl VerdictVm {
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.correct { "Correct!" } else { "Incorrect" }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "verdict verdict--correct"
        } else {
            "verdict verdict--incorrect"
        }
    }
}

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// Everything the question card renders, detached from the session.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizScreen {
    pub position_str: String,
    pub score_str: String,
    pub progress_style: String,
    pub prompt: String,
    pub section_str: String,
    pub options: Vec<OptionVm>,
    pub confirmed: bool,
    pub can_confirm: bool,
    pub can_advance: bool,
    pub finished: bool,
    pub verdict: Option<VerdictVm>,
    pub final_score_str: String,
}

//
// ─── VIEW MODEL ────────────────────────────────────────────────────────────────
//

/// A quiz session plus the list it was started from.
///
/// The loaded list is kept so a wrong-answers replay can be undone by
/// starting over.
pub struct QuizVm {
    session: QuizSession,
    loaded: Vec<Question>,
}

impl QuizVm {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            session: QuizSession::new(questions.clone()),
            loaded: questions,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// # Errors
    ///
    /// Returns `SessionError` when the option does not exist or the list is empty.
    pub fn select(&mut self, option: usize) -> Result<(), SessionError> {
        self.session.select_option(option)
    }

    pub fn advance(&mut self) -> bool {
        self.session.advance()
    }

    pub fn restrict_to_wrong(&mut self) -> RestrictOutcome {
        self.session.restrict_to_wrong()
    }

    /// Restart from the list this view model was created with.
    pub fn start_over(&mut self) {
        self.session.load(self.loaded.clone());
    }

    /// `None` when there is no question to show.
    #[must_use]
    pub fn screen(&self) -> Option<QuizScreen> {
        let session = &self.session;
        let question = session.current_question()?;
        let progress = session.progress();
        let confirmed = session.is_confirmed();
        let selected = session.selected_option();
        let phase = session.phase();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                text: text.clone(),
                state: OptionState::resolve(
                    confirmed,
                    selected == Some(index),
                    question.is_correct_option(index),
                ),
            })
            .collect();

        let verdict = session.is_correct().map(|correct| VerdictVm {
            correct,
            answer: question.answer().to_owned(),
        });

        Some(QuizScreen {
            position_str: format!("Question {} / {}", progress.position, progress.total),
            score_str: format!("Correct: {} / {}", progress.score, progress.answered),
            progress_style: format!("width: {:.0}%", progress.percent()),
            prompt: question.prompt().to_owned(),
            section_str: format!("Section: {}", question.section()),
            options,
            confirmed,
            can_confirm: !confirmed && selected.is_some(),
            can_advance: phase == SessionPhase::Confirmed,
            finished: phase == SessionPhase::Finished,
            verdict,
            final_score_str: format!("Final score: {} / {}", progress.score, progress.answered),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, answer: &str) -> Question {
        Question::new(
            "Basics",
            prompt,
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            answer,
        )
        .expect("valid question")
    }

    fn states(screen: &QuizScreen) -> Vec<OptionState> {
        screen.options.iter().map(|option| option.state).collect()
    }

    #[test]
    fn fresh_screen_has_labels_and_idle_options() {
        let vm = QuizVm::new(vec![question("Q1", "b"), question("Q2", "a")]);
        let screen = vm.screen().expect("screen");

        assert_eq!(screen.position_str, "Question 1 / 2");
        assert_eq!(screen.score_str, "Correct: 0 / 0");
        assert_eq!(screen.progress_style, "width: 50%");
        assert_eq!(screen.section_str, "Section: Basics");
        assert_eq!(states(&screen), vec![OptionState::Idle; 3]);
        assert!(!screen.can_confirm);
        assert!(screen.verdict.is_none());
    }

    #[test]
    fn wrong_confirmation_marks_choice_and_answer() {
        let mut vm = QuizVm::new(vec![question("Q1", "b"), question("Q2", "a")]);
        vm.select(2).expect("select");
        assert!(vm.screen().expect("screen").can_confirm);
        vm.session_mut().confirm().expect("confirm");

        let screen = vm.screen().expect("screen");
        assert_eq!(
            states(&screen),
            vec![
                OptionState::Idle,
                OptionState::Correct,
                OptionState::Incorrect
            ]
        );
        let verdict = screen.verdict.expect("verdict");
        assert_eq!(verdict.label(), "Incorrect");
        assert_eq!(verdict.answer, "b");
        assert!(screen.can_advance);
        assert!(!screen.finished);
    }

    #[test]
    fn last_confirmation_finishes_and_start_over_restores_list() {
        let mut vm = QuizVm::new(vec![question("Q1", "a"), question("Q2", "a")]);
        vm.select(1).expect("select");
        vm.session_mut().confirm().expect("confirm");
        assert!(vm.advance());
        vm.select(0).expect("select");
        vm.session_mut().confirm().expect("confirm");

        let screen = vm.screen().expect("screen");
        assert!(screen.finished);
        assert_eq!(screen.final_score_str, "Final score: 1 / 2");

        assert_eq!(vm.restrict_to_wrong(), RestrictOutcome::Restricted { count: 1 });
        assert_eq!(vm.session().len(), 1);

        vm.start_over();
        assert_eq!(vm.session().len(), 2);
        assert_eq!(vm.screen().expect("screen").score_str, "Correct: 0 / 0");
    }

    #[test]
    fn empty_list_has_no_screen() {
        assert!(QuizVm::new(Vec::new()).screen().is_none());
    }
}
