use rps_judge_core::engine::{Driver, DriverExit, Opponent, Session};
use rps_judge_core::errors::JudgeError;
use rps_judge_core::judge::{FailoverJudge, Judge, LlmJudge, MockJudge};
use rps_judge_core::model::{Player, RoundWinner, ValidationStatus};
use rps_judge_core::providers::llm::fake::FakeClient;
use rps_judge_core::providers::llm::tracing::TracingLlmClient;
use rps_judge_core::state::GameState;
use std::sync::Arc;

/// A reply in the shape the bundled prompt asks for, with model-style quirks:
/// a code fence and quoted bomb counts.
const FENCED_REPLY: &str = r#"```json
{
  "round_number": 1,
  "intent_understanding": {
    "player1": { "raw_input": "paper", "move_understood": "paper", "reasoning": "Exact." },
    "player2": { "raw_input": "a big rock", "move_understood": "rock", "reasoning": "Describes a rock." }
  },
  "validation": {
    "player1": { "status": "VALID", "reason": "ok" },
    "player2": { "status": "VALID", "reason": "ok" }
  },
  "game_logic": {
    "player1_move": "paper",
    "player2_move": "rock",
    "round_winner": "player1",
    "round_explanation": "Paper covers rock."
  },
  "state_update": {
    "player1_bomb_used": false,
    "player2_bomb_used": false,
    "bombs_remaining": { "player1": "1", "player2": "1" }
  },
  "final_result": {
    "move_accepted": true,
    "action": "PLAYED",
    "player_message": "Paper covers rock. Player 1 takes the round."
  }
}
```"#;

#[tokio::test]
async fn hosted_reply_with_fence_is_applied() {
    let fake = Arc::new(FakeClient::new("gemini-test").with_response(FENCED_REPLY));
    let client = Arc::new(TracingLlmClient::new(fake.clone()));
    let mut session = Session::new(Arc::new(LlmJudge::new(client)), 0);

    let outcome = session.play_round("paper", "a big rock").await.unwrap();
    assert_eq!(
        outcome.verdict.game_logic.round_winner,
        Some(RoundWinner::Player1)
    );
    assert_eq!(outcome.verdict.state_update.remaining().player2, 1);
    assert_eq!(session.state().round_number, 2);

    let call = &fake.calls()[0];
    assert!(call.prompt.contains("\"player2_move\": \"a big rock\""));
    assert!(call
        .system
        .as_deref()
        .unwrap()
        .contains("Rock-Paper-Scissors Plus"));
}

#[tokio::test]
async fn hosted_judge_cannot_clear_a_spent_bomb() {
    // The reply reports player1_bomb_used: false.
    let fake = Arc::new(FakeClient::new("m").with_response(FENCED_REPLY));
    let start = GameState {
        player1_bomb_used: true,
        ..GameState::new()
    };
    let mut session = Session::new(Arc::new(LlmJudge::new(fake)), 0).with_state(start);
    session.play_round("paper", "rock").await.unwrap();
    assert!(session.state().player1_bomb_used);
}

fn edited_reply(edit: impl FnOnce(&mut serde_json::Value)) -> String {
    let body = FENCED_REPLY
        .trim_start_matches("```json")
        .trim_end_matches("```");
    let mut val: serde_json::Value = serde_json::from_str(body).unwrap();
    edit(&mut val);
    val.to_string()
}

#[tokio::test]
async fn validated_bomb_is_spent_when_reply_forgets_it() {
    let reply = edited_reply(|v| {
        v["intent_understanding"]["player2"]["move_understood"] = "bomb".into();
        v["game_logic"]["player2_move"] = "bomb".into();
        v["game_logic"]["round_winner"] = "player2".into();
        v["state_update"]["player2_bomb_used"] = false.into();
    });
    let fake = Arc::new(FakeClient::new("m").with_response(reply));
    let mut session = Session::new(Arc::new(LlmJudge::new(fake)), 0);

    let outcome = session.play_round("paper", "bomb").await.unwrap();
    assert_eq!(outcome.verdict.status(Player::Player2), ValidationStatus::Valid);
    assert!(session.state().player2_bomb_used);
    assert!(!session.state().player1_bomb_used);
}

#[tokio::test]
async fn reply_cannot_spend_a_bomb_on_a_plain_move() {
    let reply = edited_reply(|v| {
        v["state_update"]["player1_bomb_used"] = true.into();
    });
    let fake = Arc::new(FakeClient::new("m").with_response(reply));
    let mut session = Session::new(Arc::new(LlmJudge::new(fake)), 0);

    session.play_round("paper", "a big rock").await.unwrap();
    assert!(!session.state().player1_bomb_used);
    assert!(!session.state().player2_bomb_used);
}

#[tokio::test]
async fn failover_to_mock_on_transport_error() {
    let primary = Arc::new(LlmJudge::new(Arc::new(
        FakeClient::new("m").failing("dns error: no such host"),
    )));
    let judge = FailoverJudge::new(primary, Arc::new(MockJudge::new()));
    let v = judge
        .evaluate_round(&GameState::new(), "bomb", "rock")
        .await
        .unwrap();
    assert_eq!(v.status(Player::Player1), ValidationStatus::Valid);
    assert_eq!(v.game_logic.round_winner, Some(RoundWinner::Player1));
}

#[tokio::test]
async fn missing_section_is_reported_not_applied() {
    let reply = edited_reply(|v| {
        v.as_object_mut().unwrap().remove("final_result");
    });
    let fake = Arc::new(FakeClient::new("m").with_response(reply));
    let judge = FailoverJudge::new(Arc::new(LlmJudge::new(fake)), Arc::new(MockJudge::new()));

    let err = judge
        .evaluate_round(&GameState::new(), "paper", "rock")
        .await
        .unwrap_err();
    match err {
        JudgeError::MalformedVerdict { reason, .. } => {
            assert_eq!(reason, "missing section 'final_result'")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn driver_recovers_from_bad_reply() {
    let fake = FakeClient::new("m")
        .with_responses(["{\"validation\": []}"])
        .with_response(FENCED_REPLY);
    let session = Session::new(Arc::new(LlmJudge::new(Arc::new(fake))), 0);
    let mut driver = Driver::new(
        session,
        Opponent::Human,
        &b"paper\na big rock\npaper\na big rock\nexit\n"[..],
        Vec::new(),
    );

    assert_eq!(driver.run().await.unwrap(), DriverExit::Quit);
    assert_eq!(driver.rounds_played(), 1);
    assert_eq!(driver.session().state().history.len(), 1);
    let out = String::from_utf8(driver.into_output()).unwrap();
    assert!(out.contains("judge error:"));
    assert!(out.contains("Message: Paper covers rock."));
}
