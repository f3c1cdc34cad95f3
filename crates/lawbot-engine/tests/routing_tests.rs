mod common;

use common::{bot_with, Script, ScriptedBackend};
use futures::StreamExt;
use lawbot_core::{AgentError, ExpertKind, ReplyFragment, StreamChunk, Turn, SYSTEM_AUTHOR};
use lawbot_engine::{Decision, GREETING_REPLY, WELCOME_REPLY};

async fn collect(stream: lawbot_engine::ReplyStream) -> Vec<ReplyFragment> {
    stream
        .map(|f| f.expect("fragment should not be an error"))
        .collect()
        .await
}

#[tokio::test]
async fn no_user_turn_sends_welcome_without_model_calls() {
    let backend = ScriptedBackend::new(vec![]);
    let bot = bot_with(&backend);

    for history in [
        vec![],
        vec![Turn::new("system", Some("Earlier notice".into()))],
        vec![Turn::user("old question"), Turn::new("user", None)],
    ] {
        let fragments = collect(bot.respond(&history).await.unwrap()).await;
        assert_eq!(fragments, vec![ReplyFragment::system(WELCOME_REPLY)]);
    }

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn hello_gets_greeting_without_expert_call() {
    let backend = ScriptedBackend::new(vec![Script::text(&["GREET", "ING\n"])]);
    let bot = bot_with(&backend);

    let fragments = collect(bot.respond(&[Turn::user("Hello")]).await.unwrap()).await;

    assert_eq!(fragments, vec![ReplyFragment::system(GREETING_REPLY)]);
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].profile, "Classifier");
}

#[tokio::test]
async fn classifier_receives_query_as_call_parameter() {
    let backend = ScriptedBackend::new(vec![Script::text(&["CRIMINAL"])]);
    let bot = bot_with(&backend);

    let history = vec![
        Turn::user("Hi"),
        Turn::new(SYSTEM_AUTHOR, Some(GREETING_REPLY.into())),
        Turn::user("Someone stole my phone"),
    ];
    bot.decide(&history).await.unwrap();

    let call = &backend.calls()[0];
    assert_eq!(call.context.len(), 1);
    assert!(call.context[0].is_user());
    let instruction = call.context[0].text.as_deref().unwrap();
    assert!(instruction.contains(r#"User Query: "Someone stole my phone""#));
    assert!(!call.system_prompt.contains("Someone stole my phone"));
}

#[tokio::test]
async fn punctuated_civil_output_routes_to_civil_expert() {
    let backend = ScriptedBackend::new(vec![Script::text(&["Category: ", "civil."])]);
    let bot = bot_with(&backend);

    let decision = bot.decide(&[Turn::user("Boundary dispute with neighbour")]).await.unwrap();
    assert_eq!(decision, Decision::Expert(ExpertKind::Civil));
}

#[tokio::test]
async fn unknown_output_is_echoed_in_fallback() {
    let backend = ScriptedBackend::new(vec![Script::text(&["  tax law  "])]);
    let bot = bot_with(&backend);

    let fragments = collect(bot.respond(&[Turn::user("How do I file GST?")]).await.unwrap()).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].author, SYSTEM_AUTHOR);
    assert!(fragments[0].text.contains("(Detected: 'TAX LAW')"));
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn ambiguous_output_is_unrecognized() {
    let backend = ScriptedBackend::new(vec![Script::text(&["CIVIL or CRIMINAL"])]);
    let bot = bot_with(&backend);

    let decision = bot.decide(&[Turn::user("Cheque bounce case")]).await.unwrap();
    assert_eq!(
        decision,
        Decision::Unrecognized { raw: "CIVIL OR CRIMINAL".into() }
    );
}

#[tokio::test]
async fn constitution_expert_gets_full_conversation() {
    let backend = ScriptedBackend::new(vec![
        Script::text(&["CONSTITUTION"]),
        Script::Chunks(vec![
            StreamChunk::Content("Article 19 ".into()),
            StreamChunk::Usage { input_tokens: 40, output_tokens: 6 },
            StreamChunk::Content("protects speech.".into()),
        ]),
    ]);
    let bot = bot_with(&backend);

    let history = vec![
        Turn::user("Hello"),
        Turn::new(SYSTEM_AUTHOR, Some(GREETING_REPLY.into())),
        Turn::user("Can the state ban my newspaper?"),
    ];
    let fragments = collect(bot.respond(&history).await.unwrap()).await;

    assert_eq!(
        fragments,
        vec![
            ReplyFragment::new("Constitution_agent", "Article 19 "),
            ReplyFragment::new("Constitution_agent", "protects speech."),
        ]
    );

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].profile, "Constitution_agent");
    assert_eq!(calls[1].context, history);
}

#[tokio::test]
async fn each_label_selects_its_expert_profile() {
    let cases = [
        ("CONSTITUTION", "Constitution_agent"),
        ("CRIMINAL", "BNS_agent"),
        ("CIVIL", "Civil_agent"),
        ("TRAFFIC", "Traffic_agent"),
    ];

    for (label, profile) in cases {
        let backend = ScriptedBackend::new(vec![Script::text(&[label]), Script::text(&["ok"])]);
        let bot = bot_with(&backend);

        let fragments = collect(bot.respond(&[Turn::user("question")]).await.unwrap()).await;

        assert_eq!(fragments, vec![ReplyFragment::new(profile, "ok")]);
        assert_eq!(backend.calls()[1].profile, profile);
    }
}

#[tokio::test]
async fn same_history_gives_same_decision_on_fresh_bots() {
    let history = vec![Turn::user("I got a challan for no helmet")];
    let mut decisions = Vec::new();

    for _ in 0..2 {
        let backend = ScriptedBackend::new(vec![Script::text(&["TRAFFIC"])]);
        let bot = bot_with(&backend);
        decisions.push(bot.decide(&history).await.unwrap());
    }

    assert_eq!(decisions[0], decisions[1]);
    assert_eq!(decisions[0], Decision::Expert(ExpertKind::Traffic));
}

#[tokio::test]
async fn classifier_failure_propagates() {
    let backend = ScriptedBackend::new(vec![Script::Fail("quota exceeded".into())]);
    let bot = bot_with(&backend);

    let err = bot.respond(&[Turn::user("Theft case")]).await.err().unwrap();
    assert!(matches!(err, AgentError::LlmError(msg) if msg == "quota exceeded"));
}

#[tokio::test]
async fn expert_stream_error_reaches_the_host() {
    let backend = ScriptedBackend::new(vec![
        Script::text(&["CIVIL"]),
        Script::Broken(
            vec![StreamChunk::Content("partial".into())],
            "connection reset".into(),
        ),
    ]);
    let bot = bot_with(&backend);

    let stream = bot.respond(&[Turn::user("Divorce process")]).await.unwrap();
    let results: Vec<_> = stream.collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].as_ref().unwrap(),
        &ReplyFragment::new("Civil_agent", "partial")
    );
    assert!(matches!(&results[1], Err(AgentError::LlmError(msg)) if msg == "connection reset"));
}

#[tokio::test]
async fn empty_classifier_output_is_unrecognized() {
    let backend = ScriptedBackend::new(vec![Script::Chunks(vec![])]);
    let bot = bot_with(&backend);

    let decision = bot.decide(&[Turn::user("???")]).await.unwrap();
    assert_eq!(decision, Decision::Unrecognized { raw: String::new() });
}
