use std::path::Path;

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;
use dioxus_router::Link;
use services::RestrictOutcome;

use crate::context::{AppContext, QuizStore};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{Notice, OptionVm, QuizScreen, QuizVm, VerdictVm};

/// User actions on the quiz page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Confirm,
    Next,
    StartOver,
    WrongOnly,
    ResetResults,
    Import(String),
    DismissNotice,
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_context::<QuizStore>();
    let vm = store.vm;
    let notice = store.notice;

    let resource = {
        let loader = ctx.question_loader();
        let source = ctx.question_source();
        use_resource(move || {
            let loader = loader.clone();
            let source = source.clone();
            let mut vm = vm;
            async move {
                // Coming back from another route keeps the running session.
                if vm.peek().is_some() {
                    return Ok(());
                }
                let questions = match source {
                    Some(source) => loader
                        .load(&source)
                        .await
                        .map_err(|_| ViewError::Load)?,
                    None => Vec::new(),
                };
                // An import may have landed while the load was in flight.
                if vm.peek().is_none() {
                    vm.set(Some(QuizVm::new(questions)));
                }
                Ok::<_, ViewError>(())
            }
        })
    };

    let dispatch_intent = {
        let quiz_loop = ctx.quiz_loop();
        let stats = ctx.stats();
        let loader = ctx.question_loader();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut notice = notice;
            match intent {
                QuizIntent::Select(option) => {
                    let selected = vm.write().as_mut().map(|quiz| quiz.select(option));
                    if let Some(Err(err)) = selected {
                        tracing::debug!(option, error = %err, "selection rejected");
                    }
                }
                QuizIntent::Confirm => {
                    let confirmed = vm
                        .write()
                        .as_mut()
                        .map(|quiz| quiz_loop.confirm(quiz.session_mut()));
                    match confirmed {
                        Some(Ok(answer)) => {
                            spawn(async move {
                                if answer.write.persist().await.is_err() {
                                    notice.set(Some(Notice::warning(
                                        "Your answer was scored but could not be saved to statistics.",
                                    )));
                                }
                            });
                        }
                        Some(Err(err)) => tracing::debug!(error = %err, "confirm rejected"),
                        None => {}
                    }
                }
                QuizIntent::Next => {
                    if let Some(quiz) = vm.write().as_mut() {
                        quiz.advance();
                    }
                }
                QuizIntent::StartOver => {
                    if let Some(quiz) = vm.write().as_mut() {
                        quiz.start_over();
                    }
                    notice.set(None);
                }
                QuizIntent::WrongOnly => {
                    let outcome = vm.write().as_mut().map(QuizVm::restrict_to_wrong);
                    match outcome {
                        Some(RestrictOutcome::NothingWrong) => {
                            notice.set(Some(Notice::info("There are no wrong answers to review.")));
                        }
                        Some(RestrictOutcome::Restricted { count }) => {
                            tracing::info!(count, "replaying wrong answers");
                            notice.set(None);
                        }
                        None => {}
                    }
                }
                QuizIntent::ResetResults => {
                    let stats = stats.clone();
                    spawn(async move {
                        match stats.clear_all().await {
                            Ok(()) => {
                                if let Some(quiz) = vm.write().as_mut() {
                                    quiz.start_over();
                                }
                                notice.set(Some(Notice::info("All saved results were cleared.")));
                            }
                            Err(_) => {
                                notice.set(Some(Notice::error(
                                    "Could not clear saved results. Please try again.",
                                )));
                            }
                        }
                    });
                }
                QuizIntent::Import(path) => {
                    let loader = loader.clone();
                    spawn(async move {
                        match loader.import_file(Path::new(path.trim())).await {
                            Ok(questions) => {
                                let count = questions.len();
                                vm.set(Some(QuizVm::new(questions)));
                                notice.set(Some(Notice::info(format!(
                                    "Imported {count} questions."
                                ))));
                            }
                            Err(err) => {
                                notice.set(Some(Notice::error(format!(
                                    "Could not import questions: {err}"
                                ))));
                            }
                        }
                    });
                }
                QuizIntent::DismissNotice => notice.set(None),
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let (loaded, screen) = {
        let guard = vm.read();
        (guard.is_some(), guard.as_ref().and_then(QuizVm::screen))
    };
    // Once a session exists it wins over the initial load outcome, so an
    // import recovers from a failed load.
    let state = if loaded {
        ViewState::Ready(())
    } else {
        view_state_from_resource(&resource)
    };
    let banner = notice.read().clone().map(|notice| {
        rsx! {
            NoticeBanner {
                notice,
                on_dismiss: move |()| dispatch_intent.call(QuizIntent::DismissNotice),
            }
        }
    });

    rsx! {
        div { class: "page quiz",
            header { class: "quiz-header",
                h2 { "Quiz" }
                div { class: "quiz-actions",
                    button {
                        class: "btn btn-warning",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::WrongOnly),
                        "Wrong answers only"
                    }
                    Link { class: "btn btn-stats", to: Route::Stats {}, "Statistics" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::ResetResults),
                        "Reset results"
                    }
                }
                ImportPanel {
                    on_import: move |path: String| dispatch_intent.call(QuizIntent::Import(path)),
                }
            }

            {banner}

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Ready(()) => match screen {
                    Some(screen) => rsx! {
                        QuestionCard { screen, dispatch: dispatch_intent }
                    },
                    None => rsx! {
                        p { class: "quiz-empty", "No questions available." }
                    },
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(screen: QuizScreen, dispatch: Callback<QuizIntent>) -> Element {
    let verdict = screen.verdict.clone().map(|verdict| rsx! { Verdict { verdict } });

    rsx! {
        section { class: "question-card",
            div { class: "question-meta",
                span { class: "question-position", "{screen.position_str}" }
                span { class: "question-score", "{screen.score_str}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "{screen.progress_style}" }
            }

            h3 { class: "question-prompt", "{screen.prompt}" }
            p { class: "question-section", "{screen.section_str}" }

            div { class: "options",
                for (index, option) in screen.options.iter().cloned().enumerate() {
                    OptionButton {
                        key: "{index}",
                        option,
                        locked: screen.confirmed,
                        dispatch,
                    }
                }
            }

            if screen.can_confirm {
                button {
                    class: "btn btn-primary btn-wide",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::Confirm),
                    "Confirm"
                }
            }

            {verdict}

            if screen.can_advance {
                button {
                    class: "btn btn-success btn-wide",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "Next question"
                }
            }

            if screen.finished {
                div { class: "quiz-finished",
                    h3 { "Quiz complete!" }
                    p { "{screen.final_score_str}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::StartOver),
                        "Start over"
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, locked: bool, dispatch: Callback<QuizIntent>) -> Element {
    let index = option.index;
    rsx! {
        button {
            class: "{option.state.class()}",
            r#type: "button",
            disabled: locked,
            onclick: move |_| dispatch.call(QuizIntent::Select(index)),
            "{option.text}"
        }
    }
}

#[component]
fn Verdict(verdict: VerdictVm) -> Element {
    rsx! {
        div { class: "verdict-panel",
            span { class: "{verdict.class()}", "{verdict.label()}" }
            p { "Answer: {verdict.answer}" }
        }
    }
}

#[component]
fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "{notice.class()}", role: "status",
            span { "{notice.text}" }
            button {
                class: "notice-dismiss",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}

#[component]
fn ImportPanel(on_import: EventHandler<String>) -> Element {
    let mut path = use_signal(String::new);

    rsx! {
        div { class: "import-panel",
            input {
                r#type: "text",
                placeholder: "path/to/questions.json",
                value: "{path}",
                oninput: move |evt| path.set(evt.value()),
            }
            button {
                class: "btn btn-import",
                r#type: "button",
                onclick: move |_| on_import.call(path()),
                "Import JSON"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
