use std::io::Write as _;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{QuestionLoader, QuestionSource, QuizLoopService, StatsService};
use storage::repository::{ResultRepository, Storage};
use tempfile::NamedTempFile;

use crate::context::{QuizStore, UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{QuizIntent, QuizView, StatsView};

pub const TWO_QUESTIONS: &str = r#"[
    {"section": "Math", "question": "What is 2 + 2?", "options": ["3", "4", "5"], "answer": "4"},
    {"section": "Math", "question": "What is 3 * 3?", "options": ["6", "9"], "answer": "9"}
]"#;

#[derive(Clone)]
struct TestApp {
    question_source: Option<QuestionSource>,
    question_loader: Arc<QuestionLoader>,
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl UiApp for TestApp {
    fn question_source(&self) -> Option<QuestionSource> {
        self.question_source.clone()
    }

    fn question_loader(&self) -> Arc<QuestionLoader> {
        Arc::clone(&self.question_loader)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Stats,
}

/// Where the harness points the initial question load.
pub enum Questions<'a> {
    None,
    Json(&'a str),
    Missing,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(QuizStore::new);
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Stats => rsx! { StatsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub results: Arc<dyn ResultRepository>,
    pub quiz_handles: QuizTestHandles,
    _questions_file: Option<NamedTempFile>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending tasks until the rendered HTML contains `needle`.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..40 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.quiz_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, questions: Questions<'_>) -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_results(view, questions, Arc::clone(&storage.results))
}

pub fn setup_view_harness_with_results(
    view: ViewKind,
    questions: Questions<'_>,
    results: Arc<dyn ResultRepository>,
) -> ViewHarness {
    let (question_source, questions_file) = match questions {
        Questions::None => (None, None),
        Questions::Json(raw) => {
            let mut file = NamedTempFile::new().expect("temp file");
            file.write_all(raw.as_bytes()).expect("write questions");
            let source = QuestionSource::File(file.path().to_path_buf());
            (Some(source), Some(file))
        }
        Questions::Missing => (
            Some(QuestionSource::File("/nonexistent/questions.json".into())),
            None,
        ),
    };

    let app = Arc::new(TestApp {
        question_source,
        question_loader: Arc::new(QuestionLoader::new()),
        quiz_loop: Arc::new(QuizLoopService::new(Arc::clone(&results))),
        stats: Arc::new(StatsService::new(Arc::clone(&results))),
    });
    let quiz_handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        results,
        quiz_handles,
        _questions_file: questions_file,
    }
}
