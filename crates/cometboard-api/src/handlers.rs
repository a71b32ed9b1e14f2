//! REST API endpoint handlers for the score server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/scores` | All score records, best tier and score first |
//! | `POST` | `/scores` | Submit a score |
//! | `GET` | `/scores/best` | Best record for one difficulty |
//! | `GET` | `/leaderboard` | Published leaderboard snapshot |

use std::cmp::Reverse;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use cometboard_core::{AccountIdentity, ScoreIntake};
use cometboard_types::{LeaderboardEntry, ScoreRecord};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Query parameters for `GET /scores` and `GET /leaderboard`.
#[derive(Debug, serde::Deserialize)]
pub struct LimitQuery {
    /// Maximum number of rows to return; absent or zero means all.
    pub limit: Option<usize>,
}

/// Query parameters for `GET /scores/best`.
#[derive(Debug, serde::Deserialize)]
pub struct BestQuery {
    /// Difficulty to look up; defaults to medium like the original client.
    pub difficulty: Option<String>,
}

/// Body of `POST /scores`.
///
/// `score` is accepted as a raw JSON number so non-integers get a 400
/// instead of a body-rejection; the original API demanded
/// `typeof score === 'number'` and we keep that strictness for integers.
#[derive(Debug, serde::Deserialize)]
pub struct SubmitRequest {
    /// The submitting player's account name.
    pub username: Option<String>,
    /// Difficulty text; missing or unrecognized falls back to medium.
    pub difficulty: Option<String>,
    /// The achieved score.
    pub score: Option<serde_json::Number>,
}

/// Body of a successful `POST /scores` response.
#[derive(Debug, serde::Serialize)]
pub struct SubmitResponse {
    /// Human-readable outcome line.
    pub message: String,
    /// Whether this submission became the player's best for the tier.
    pub is_new_best: bool,
    /// The stored best after the submission.
    pub best_score: u32,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (revision, entries) = state
        .leaderboard
        .current()
        .map_or((0, 0), |s| (s.revision, s.entries.len()));

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Cometboard</title>
</head>
<body>
    <h1>Cometboard</h1>
    <p>Status: RUNNING -- snapshot revision {revision}, {entries} ranked players</p>
    <ul>
        <li><a href="/scores">GET /scores</a> -- all score records</li>
        <li><a href="/scores/best">GET /scores/best?difficulty=</a> -- best record for a difficulty</li>
        <li><a href="/leaderboard">GET /leaderboard</a> -- published leaderboard</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /scores
// ---------------------------------------------------------------------------

/// List all score records ordered by tier descending then score descending.
pub async fn list_scores(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
    let mut records = state.store.list_all().await?;
    records.sort_by_key(|r| (Reverse(r.difficulty), Reverse(r.score)));

    if let Some(limit) = query.limit {
        if limit > 0 {
            records.truncate(limit);
        }
    }

    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// POST /scores
// ---------------------------------------------------------------------------

/// Submit a score for a player.
///
/// Validation failures answer 400 with no state change. A submission that
/// does not beat the stored best is a no-op and reports the existing best.
/// In push deployments an accepted write forces one recomputation pass
/// before the response, so the caller's next leaderboard read sees it.
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(String::from("username is required")))?;

    let score = request
        .score
        .as_ref()
        .and_then(serde_json::Number::as_i64)
        .ok_or_else(|| ApiError::InvalidInput(String::from("score must be an integer")))?;

    let identity = AccountIdentity::new(username, username);
    let receipt = state
        .intake
        .submit(&identity, request.difficulty.as_deref(), score)
        .await?;

    if receipt.is_new_best && state.refresh_on_write {
        // Blocks for at most one recomputation pass; a missing worker is a
        // deployment fault worth logging, not a failed submission.
        if let Err(error) = state.leaderboard.refresh_now().await {
            tracing::warn!(%error, "post-write leaderboard refresh failed");
        }
    }

    Ok(Json(SubmitResponse {
        message: String::from("Score processed successfully."),
        is_new_best: receipt.is_new_best,
        best_score: receipt.best_score,
    }))
}

// ---------------------------------------------------------------------------
// GET /scores/best
// ---------------------------------------------------------------------------

/// The best single record for one difficulty, `null` when none exists.
pub async fn get_best(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BestQuery>,
) -> Result<Json<Option<ScoreRecord>>, ApiError> {
    let tier = ScoreIntake::normalize_difficulty(query.difficulty.as_deref());
    let best = state.store.get_best(tier).await?;
    Ok(Json(best))
}

// ---------------------------------------------------------------------------
// GET /leaderboard
// ---------------------------------------------------------------------------

/// The published leaderboard snapshot.
///
/// Waits up to the configured ceiling for the first load; afterwards always
/// answers from the latest snapshot, even while the store is unreachable.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let snapshot = state
        .leaderboard
        .wait_first_load(state.first_load_timeout)
        .await?;

    let mut entries = snapshot.entries.clone();
    if let Some(limit) = query.limit {
        if limit > 0 {
            entries.truncate(limit);
        }
    }

    Ok(Json(entries))
}
