mod common;

use common::{
    GatedStore, MockAgent, MockCalculator, ReadOnlyStore, agent_error, calculation_success, reply,
};
use roi_application::chat_session::{ERROR_FALLBACK, GREETING_FALLBACK, REPLY_FALLBACK};
use roi_application::{CalculationTrigger, ChatSession, SelectionUseCase, SendOutcome};
use roi_core::agent::{GREETING_TOKEN, ReplyStatus};
use roi_core::error::RoiError;
use roi_core::route::Route;
use roi_core::session::{AgentMode, CompanyProfile, MessageRole, SessionContext};
use roi_core::store::{SessionStore, StoreKey};
use roi_infrastructure::InMemorySessionStore;
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    session: ChatSession,
    agent: Arc<MockAgent>,
    calculator: Arc<MockCalculator>,
    store: Arc<InMemorySessionStore>,
}

fn fixture_with(agent: MockAgent, mode: AgentMode) -> Fixture {
    let agent = Arc::new(agent);
    let calculator = Arc::new(MockCalculator::new(Ok(calculation_success(
        "order_to_cash",
    ))));
    let store = Arc::new(InMemorySessionStore::new());
    let trigger = CalculationTrigger::new(calculator.clone(), store.clone());
    let session = ChatSession::new(
        SessionContext::new("order_to_cash", mode),
        agent.clone(),
        trigger,
        store.clone(),
    );
    Fixture {
        session,
        agent,
        calculator,
        store,
    }
}

fn session_with_store(
    agent: Arc<MockAgent>,
    store: Arc<dyn SessionStore>,
    mode: AgentMode,
) -> ChatSession {
    let calculator = Arc::new(MockCalculator::new(Ok(calculation_success(
        "order_to_cash",
    ))));
    let trigger = CalculationTrigger::new(calculator, store.clone());
    ChatSession::new(
        SessionContext::new("order_to_cash", mode),
        agent,
        trigger,
        store,
    )
}

#[tokio::test]
async fn test_greeting_is_sent_but_not_shown() {
    let f = fixture_with(
        MockAgent::new(vec![Ok(reply(json!({
            "response": "Hi! Tell me about your order-to-cash process.",
            "conversation_id": "conv-1"
        })))]),
        AgentMode::Guided,
    );

    let outcome = f.session.start().await.unwrap();
    assert!(matches!(outcome, SendOutcome::Replied { ready: false, .. }));

    let transcript = f.session.transcript().await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].role, MessageRole::Assistant);
    assert_eq!(
        transcript.turns()[0].content,
        "Hi! Tell me about your order-to-cash process."
    );

    let request = &f.agent.requests()[0];
    assert_eq!(request.message, GREETING_TOKEN);
    assert!(request.conversation_id.is_none());
    assert!(request.current_state.is_none());
    assert!(request.conversation_history.is_empty());
}

#[tokio::test]
async fn test_empty_replies_use_fallback_texts() {
    let f = fixture_with(
        MockAgent::new(vec![
            Ok(reply(json!({"response": ""}))),
            Ok(reply(json!({"success": true}))),
        ]),
        AgentMode::Guided,
    );

    f.session.start().await.unwrap();
    f.session.send("We have 40 people").await.unwrap();

    let contents: Vec<_> = f
        .session
        .transcript()
        .await
        .turns()
        .iter()
        .map(|t| t.content.clone())
        .collect();
    assert_eq!(
        contents,
        vec![GREETING_FALLBACK, "We have 40 people", REPLY_FALLBACK]
    );
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let f = fixture_with(MockAgent::new(vec![]), AgentMode::Expert);

    assert_eq!(f.session.send("   \n").await.unwrap(), SendOutcome::Ignored);
    assert_eq!(f.agent.calls(), 0);
    assert!(f.session.transcript().await.is_empty());
}

#[tokio::test]
async fn test_failed_turn_shows_apology_and_allows_resubmit() {
    let f = fixture_with(
        MockAgent::new(vec![
            Ok(reply(json!({"response": "Hello!", "conversation_id": "c1"}))),
            Err(agent_error()),
            Ok(reply(json!({"response": "Got it"}))),
        ]),
        AgentMode::Guided,
    );
    f.session.start().await.unwrap();

    let err = f.session.send("120 invoices").await.unwrap_err();
    assert!(err.is_agent_call_failed());

    let transcript = f.session.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.last().unwrap().content, ERROR_FALLBACK);
    assert_eq!(
        f.session.status().await.conversation_id.unwrap().as_str(),
        "c1"
    );

    f.session.send("120 invoices").await.unwrap();
    assert_eq!(f.agent.requests()[2].conversation_id.as_ref().unwrap().as_str(), "c1");
}

#[tokio::test]
async fn test_clear_twice_yields_same_clean_state() {
    let f = fixture_with(
        MockAgent::new(vec![
            Ok(reply(json!({"response": "Welcome", "conversation_id": "c1"}))),
            Ok(reply(json!({
                "response": "Done",
                "status": "data_completed",
                "data": {"orders": 10},
                "conversation_id": "c1",
                "conversation_history": [{"m": 1}, {"m": 2}]
            }))),
            Ok(reply(json!({"response": "Welcome again"}))),
            Ok(reply(json!({"response": "Welcome again"}))),
        ]),
        AgentMode::Expert,
    );
    f.session.start().await.unwrap();
    f.session.send("template contents").await.unwrap();
    assert!(f.store.get(StoreKey::CollectedData).await.unwrap().is_some());
    f.store
        .set(StoreKey::CalculationResult, json!({"kept": true}))
        .await
        .unwrap();

    f.session.clear().await.unwrap();
    let first_status = f.session.status().await;
    let first_transcript: Vec<_> = f
        .session
        .transcript()
        .await
        .turns()
        .iter()
        .map(|t| (t.role, t.content.clone()))
        .collect();
    assert_eq!(f.agent.calls(), 3);

    f.session.clear().await.unwrap();
    let second_transcript: Vec<_> = f
        .session
        .transcript()
        .await
        .turns()
        .iter()
        .map(|t| (t.role, t.content.clone()))
        .collect();
    assert_eq!(f.agent.calls(), 4);

    assert_eq!(first_status, f.session.status().await);
    assert_eq!(first_transcript, second_transcript);
    assert_eq!(
        first_transcript,
        vec![(MessageRole::Assistant, "Welcome again".to_string())]
    );
    assert_eq!(first_status.history_len, 0);
    assert!(!first_status.ready_to_calculate);
    assert!(first_status.conversation_id.is_none());

    for request in &f.agent.requests()[2..] {
        assert_eq!(request.message, GREETING_TOKEN);
        assert!(request.conversation_id.is_none());
        assert!(request.conversation_history.is_empty());
    }
    assert!(f.store.get(StoreKey::CollectedData).await.unwrap().is_none());
    assert!(f.store.get(StoreKey::CalculationResult).await.unwrap().is_some());
}

#[tokio::test]
async fn test_stale_reply_after_clear_does_not_reach_transcript() {
    let (agent, entered, release) = MockAgent::new(vec![
        Ok(reply(json!({"response": "Welcome"}))),
        Ok(reply(json!({
            "response": "stale answer",
            "conversation_id": "pre-reset",
            "status": "completed",
            "current_state": {"collected_data": {"a": 1}}
        }))),
        Ok(reply(json!({"response": "Fresh welcome", "conversation_id": "post-reset"}))),
    ])
    .with_gate("slow message");
    let f = fixture_with(agent, AgentMode::Guided);
    let session = Arc::new(f.session);
    session.start().await.unwrap();

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.send("slow message").await })
    };
    entered.notified().await;
    session.clear().await.unwrap();
    release.notify_one();

    assert_eq!(pending.await.unwrap().unwrap(), SendOutcome::Discarded);

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].content, "Fresh welcome");

    let status = session.status().await;
    assert_eq!(status.conversation_id.unwrap().as_str(), "post-reset");
    assert!(!status.ready_to_calculate);
    assert!(f.store.get(StoreKey::CollectedData).await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_during_data_save_leaves_only_fresh_greeting() {
    let agent = Arc::new(MockAgent::new(vec![
        Ok(reply(json!({"response": "Welcome", "conversation_id": "pre-reset"}))),
        Ok(reply(json!({
            "status": "data_completed",
            "data": {"b": 2},
            "response": "answer before clear"
        }))),
        Ok(reply(json!({"response": "Fresh welcome", "conversation_id": "post-reset"}))),
    ]));
    let (store, entered, release) = GatedStore::new(StoreKey::CollectedData);
    let store = Arc::new(store);
    let session = Arc::new(session_with_store(
        agent.clone(),
        store.clone(),
        AgentMode::Expert,
    ));
    session.start().await.unwrap();

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.send("data").await })
    };
    entered.notified().await;

    let clearing = {
        let session = session.clone();
        tokio::spawn(async move { session.clear().await })
    };
    tokio::task::yield_now().await;
    release.notify_one();

    pending.await.unwrap().unwrap();
    clearing.await.unwrap().unwrap();

    let transcript = session.transcript().await;
    let contents: Vec<&str> = transcript.turns().iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["Fresh welcome"]);

    let status = session.status().await;
    assert_eq!(status.conversation_id.unwrap().as_str(), "post-reset");
    assert!(!status.ready_to_calculate);
    assert!(session.calculate().await.is_err());
    assert!(store.get(StoreKey::CollectedData).await.unwrap().is_none());
    assert_eq!(agent.calls(), 3);
}

#[tokio::test]
async fn test_clear_that_cannot_reach_store_keeps_chat() {
    let agent = Arc::new(MockAgent::new(vec![Ok(reply(json!({
        "response": "Welcome",
        "conversation_id": "conv-1"
    })))]));
    let session = session_with_store(
        agent.clone(),
        Arc::new(ReadOnlyStore::default()),
        AgentMode::Guided,
    );
    session.start().await.unwrap();

    let err = session.clear().await.unwrap_err();
    assert!(matches!(err, RoiError::Store(_)));

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].content, "Welcome");
    let status = session.status().await;
    assert_eq!(status.conversation_id.unwrap().as_str(), "conv-1");
    assert_eq!(agent.calls(), 1);
}

#[tokio::test]
async fn test_correction_round_changes_hint_and_status() {
    let f = fixture_with(
        MockAgent::new(vec![Ok(reply(json!({
            "response": "Please fix the highlighted values",
            "status": "awaiting_corrections",
            "missing_or_invalid_fields": [{"field": "dso"}, {"field": "headcount"}]
        })))]),
        AgentMode::Expert,
    );
    assert_eq!(
        f.session.input_hint().await,
        "write the general description of the process"
    );

    let outcome = f.session.send("data").await.unwrap();
    assert!(matches!(
        outcome,
        SendOutcome::Replied {
            status: ReplyStatus::AwaitingCorrections,
            ..
        }
    ));
    assert_eq!(f.session.input_hint().await, "Send only the corrected value...");
    assert_eq!(f.session.status().await.pending_corrections, 2);
}

#[tokio::test]
async fn test_completion_then_calculation() {
    let f = fixture_with(
        MockAgent::new(vec![Ok(reply(json!({
            "response": "All data collected",
            "status": "completed",
            "current_state": {"collected_data": {"invoices": 1200}}
        })))]),
        AgentMode::Guided,
    );

    let outcome = f.session.send("last answer").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Replied { ready: true, .. }));
    assert_eq!(
        f.store.get(StoreKey::CollectedData).await.unwrap(),
        Some(json!({"invoices": 1200}))
    );

    let calculation = f.session.calculate().await.unwrap();
    assert_eq!(
        calculation.next,
        Route::Overview {
            system: "order_to_cash".into()
        }
    );
    let request = f.calculator.last_request().unwrap();
    assert_eq!(request.system, "order_to_cash");
    assert_eq!(request.collected_data.as_value(), &json!({"invoices": 1200}));
    assert!(f.store.get(StoreKey::CalculationResult).await.unwrap().is_some());
}

#[tokio::test]
async fn test_calculate_before_completion_makes_no_call() {
    let f = fixture_with(MockAgent::new(vec![]), AgentMode::Guided);
    let err = f.session.calculate().await.unwrap_err();
    assert!(err.is_calculation_failed());
    assert_eq!(f.calculator.calls(), 0);
}

#[tokio::test]
async fn test_open_requires_selection() {
    let agent = Arc::new(MockAgent::new(vec![]));
    let store = Arc::new(InMemorySessionStore::new());
    let trigger = CalculationTrigger::new(
        Arc::new(MockCalculator::new(Ok(json!({})))),
        store.clone(),
    );

    let err = ChatSession::open(store.clone(), agent.clone(), trigger.clone())
        .await
        .err()
        .unwrap();
    assert!(err.is_precondition_missing());
    assert_eq!(agent.calls(), 0);

    let selection = SelectionUseCase::new(store.clone());
    selection.select_system("legacy_takeover").await.unwrap();
    selection
        .choose_agent(
            AgentMode::Expert,
            CompanyProfile::new("Globex", "1000+", "tecnologia", vec![]).unwrap(),
        )
        .await
        .unwrap();

    let session = ChatSession::open(store, agent, trigger).await.unwrap();
    assert_eq!(session.context().system_id, "legacy_takeover");
    assert_eq!(session.agent_name(), "GPT ROI First");
    assert_eq!(
        session.template().unwrap().download_name,
        "template_legacy_takeover.txt"
    );
}
