use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mentions_engine::{
    EditDecision, EditorConfig, HighlightKind, MentionSession, SearchError, SearchProvider, SearchState, StaticDirectoryProvider,
};
use tokio::sync::oneshot;

type Outcome = Result<Vec<String>, SearchError>;

/// Provider whose answers are released by the test, one gate per query.
#[derive(Debug, Default)]
struct GatedProvider {
    gates: Mutex<HashMap<String, oneshot::Receiver<Outcome>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedProvider {
    fn gate(&self, query: &str) -> oneshot::Sender<Outcome> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().expect("gates lock").insert(query.to_string(), receiver);
        sender
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl SearchProvider for GatedProvider {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.calls.lock().expect("calls lock").push(query.to_string());
        let gate = self.gates.lock().expect("gates lock").remove(query);
        match gate {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(SearchError::provider_failure("gate dropped"))),
            None => Err(SearchError::provider_failure(format!("no gate for '{query}'"))),
        }
    }
}

fn addresses(items: &[&str]) -> Outcome {
    Ok(items.iter().map(|item| item.to_string()).collect())
}

async fn settle(session: &mut MentionSession) {
    while session.next_completion().await.is_some() {}
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_response_to_older_query_is_discarded() {
    let provider = Arc::new(GatedProvider::default());
    let release_a = provider.gate("a");
    let release_ab = provider.gate("ab");
    let mut session = MentionSession::new(&EditorConfig::default(), provider.clone());

    session.text_changed("@a", 2).expect("text change");
    tokio::task::yield_now().await;
    session.text_changed("@ab", 3).expect("text change");

    release_ab.send(addresses(&["ab@example.com"])).expect("ab gate open");
    let _ = release_a.send(addresses(&["a@example.com", "ab@example.com"]));
    settle(&mut session).await;

    assert_eq!(session.search_state(), &SearchState::Fetched(vec!["ab@example.com".into()]));
    assert_eq!(session.editor().search_session().query, "ab");
}

#[tokio::test]
async fn out_of_order_completions_apply_only_the_newest() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(GatedProvider::default()));
    let editor = session.editor_mut();

    let first = editor.apply_text_change("@a", 2).expect("text change").expect("request");
    let second = editor.apply_text_change("@ab", 3).expect("text change").expect("request");

    assert!(editor.apply_search_completion(second.complete(addresses(&["ab@example.com"]))));
    assert!(!editor.apply_search_completion(first.complete(addresses(&["a@example.com"]))));
    assert_eq!(editor.search_state().results(), Some(&["ab@example.com".to_string()][..]));
}

#[tokio::test]
async fn identical_query_is_searched_once() {
    let provider = Arc::new(GatedProvider::default());
    let release = provider.gate("al");
    let mut session = MentionSession::new(&EditorConfig::default(), provider.clone());

    session.text_changed("hi @al", 6).expect("text change");
    session.cursor_moved(5).expect("cursor move");
    session.cursor_moved(6).expect("cursor move");
    release.send(addresses(&["alice@example.com"])).expect("gate open");
    settle(&mut session).await;

    assert_eq!(provider.calls(), vec!["al".to_string()]);
    assert_eq!(session.search_state().results().map(<[String]>::len), Some(1));
}

#[tokio::test]
async fn empty_and_unmatched_queries_differ() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(StaticDirectoryProvider::sample()));

    session.text_changed("@", 1).expect("text change");
    settle(&mut session).await;
    assert_eq!(session.search_state(), &SearchState::Failed("Search text is empty".into()));

    session.text_changed("@zzz", 4).expect("text change");
    settle(&mut session).await;
    assert_eq!(session.search_state(), &SearchState::Fetched(Vec::new()));
}

#[tokio::test(start_paused = true)]
async fn stalled_provider_fails_after_timeout() {
    let provider = Arc::new(GatedProvider::default());
    let _held_open = provider.gate("al");
    let config = EditorConfig {
        search_timeout_ms: 200,
        ..EditorConfig::default()
    };
    let mut session = MentionSession::new(&config, provider);

    session.text_changed("@al", 3).expect("text change");
    settle(&mut session).await;

    assert_eq!(session.search_state().failure(), Some("search for 'al' timed out after 200ms"));
}

#[tokio::test]
async fn mention_to_confirmed_entity_round_trip() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(StaticDirectoryProvider::sample()));

    session.text_changed("hi @test", 8).expect("text change");
    settle(&mut session).await;
    let candidate = session.search_state().results().and_then(|results| results.first().cloned()).expect("candidate");
    assert_eq!(candidate, "test@example.com");

    let outcome = session.select(&candidate).expect("commit");
    assert_eq!(outcome.text, "hi test@example.com ");
    assert_eq!(outcome.cursor, 3 + 16 + 1);
    assert!(session.search_state().is_idle());
    assert_eq!(session.editor_mut().take_cursor_override(), Some(20));

    let spans = session.editor().highlighted_spans().expect("spans");
    assert_eq!(spans[1].kind, HighlightKind::TaggedEntity);
    assert_eq!((spans[1].start, spans[1].length), (3, 16));
    assert_eq!(session.editor().postable_text().expect("postable"), "hi @[test@example.com](user:0) ");
}

#[tokio::test]
async fn backspace_into_confirmed_entity_removes_it() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(StaticDirectoryProvider::sample()));
    session.text_changed("hi @test", 8).expect("text change");
    settle(&mut session).await;
    session.select("test@example.com").expect("commit");
    session.text_changed("hi test@example.com and more", 19).expect("text change");

    let decision = session.guard_edit(18..19, "").expect("guard");
    assert_eq!(
        decision,
        EditDecision::Replace {
            text: "hi  and more".into(),
            cursor: 3,
            replaced: 3..19,
        }
    );
    assert_eq!(session.editor().text(), "hi  and more");
    assert_eq!(session.editor_mut().take_cursor_override(), Some(3));

    assert_eq!(session.guard_edit(4..5, "").expect("guard"), EditDecision::Apply);
}

#[tokio::test]
async fn confirmed_entity_under_cursor_keeps_its_style() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(StaticDirectoryProvider::sample()));
    session.text_changed("@user1", 6).expect("text change");
    settle(&mut session).await;
    session.select("user1@example.com").expect("commit");
    session.text_changed("user1@example.com @us", 10).expect("text change");

    let kinds: Vec<_> = session
        .editor()
        .styled_runs()
        .expect("runs")
        .into_iter()
        .map(|run| run.kind)
        .collect();
    assert_eq!(kinds, vec![Some(HighlightKind::TaggedEntity), None, Some(HighlightKind::Default)]);
}

#[derive(Debug)]
struct PanickingProvider;

#[async_trait]
impl SearchProvider for PanickingProvider {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        panic!("directory lookup for '{query}' crashed");
    }
}

#[tokio::test]
async fn panicking_provider_fails_the_search() {
    let mut session = MentionSession::new(&EditorConfig::default(), Arc::new(PanickingProvider));
    session.text_changed("@al", 3).expect("text change");

    let settled = tokio::time::timeout(std::time::Duration::from_secs(2), settle(&mut session)).await;
    assert!(settled.is_ok(), "session kept waiting on a crashed search");
    assert!(!session.is_searching());
    assert_eq!(session.search_state().failure(), Some("search provider stopped without a result"));

    session.text_changed("@al ", 3).expect("text change");
    assert!(session.is_searching(), "failed query is retried");
}
