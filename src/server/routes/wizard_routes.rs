//! Wizard flow command routing
//!
//! Handles: start_wizard, get_wizard_questions, record_response,
//! advance_category, finalize_draft, submit_brief, get_suggestion,
//! get_category_suggestions, get_wizard_progress

use crate::commands;
use crate::events::{
    BriefSubmittedPayload, DraftEventPayload, ResponseRecordedPayload, EVENT_BRIEF_SUBMITTED,
    EVENT_CATEGORY_ADVANCED, EVENT_DRAFT_CREATED, EVENT_DRAFT_FINALIZED, EVENT_RESPONSE_RECORDED,
};
use serde_json::Value;

use super::{get_arg, get_client_id, get_opt_arg, route_async, ServerAppState};

/// Route wizard flow commands
pub async fn route_wizard_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "start_wizard" => {
            let client_id = get_client_id(&args)?;

            let outcome =
                commands::wizard::start_wizard(&state.data_dir, &state.catalog, client_id).await?;
            if !outcome.resumed {
                state.broadcaster.broadcast(
                    EVENT_DRAFT_CREATED,
                    DraftEventPayload::from_draft(&outcome.draft),
                );
            }

            serde_json::to_value(outcome).map_err(|e| e.to_string())
        }

        "get_wizard_questions" => {
            let client_id = get_client_id(&args)?;
            let category: String = get_arg(&args, "category")?;
            route_async!(
                cmd,
                commands::wizard::get_wizard_questions(&state.catalog, client_id, category)
            )
        }

        "record_response" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            let question_id: String = get_arg(&args, "questionId")?;
            let response_text: String = get_arg(&args, "responseText")?;
            let ai_suggested_text: Option<String> = get_opt_arg(&args, "aiSuggestedText")?;
            let used_suggestion: bool =
                get_opt_arg(&args, "usedSuggestion")?.unwrap_or(false);

            let response = commands::wizard::record_response(
                &state.data_dir,
                &state.catalog,
                client_id.clone(),
                draft_id,
                question_id,
                response_text,
                ai_suggested_text,
                used_suggestion,
            )
            .await?;

            state.broadcaster.broadcast(
                EVENT_RESPONSE_RECORDED,
                ResponseRecordedPayload {
                    draft_id: response.draft_id.clone(),
                    client_id,
                    question_id: response.question_id.clone(),
                    used_suggestion: response.used_suggestion,
                },
            );

            serde_json::to_value(response).map_err(|e| e.to_string())
        }

        "advance_category" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;

            let outcome = commands::wizard::advance_category(
                &state.data_dir,
                &state.catalog,
                client_id,
                draft_id,
            )
            .await?;

            let event = if outcome.is_complete {
                EVENT_DRAFT_FINALIZED
            } else {
                EVENT_CATEGORY_ADVANCED
            };
            state
                .broadcaster
                .broadcast(event, DraftEventPayload::from_draft(&outcome.draft));

            serde_json::to_value(outcome).map_err(|e| e.to_string())
        }

        "finalize_draft" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;

            let draft = commands::wizard::finalize_draft(
                &state.data_dir,
                &state.catalog,
                client_id,
                draft_id,
            )
            .await?;

            state
                .broadcaster
                .broadcast(EVENT_DRAFT_FINALIZED, DraftEventPayload::from_draft(&draft));

            serde_json::to_value(draft).map_err(|e| e.to_string())
        }

        "submit_brief" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            let title: String = get_arg(&args, "title")?;
            let category: String = get_arg(&args, "category")?;

            let brief = commands::wizard::submit_brief(
                &state.data_dir,
                &state.catalog,
                client_id,
                draft_id.clone(),
                title,
                category,
            )
            .await?;

            state.broadcaster.broadcast(
                EVENT_BRIEF_SUBMITTED,
                BriefSubmittedPayload::from_brief(&brief, &draft_id),
            );

            serde_json::to_value(brief).map_err(|e| e.to_string())
        }

        "get_suggestion" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            let question_id: String = get_arg(&args, "questionId")?;
            route_async!(
                cmd,
                commands::wizard::get_suggestion(
                    &state.data_dir,
                    &state.catalog,
                    state.suggestions.as_ref(),
                    client_id,
                    draft_id,
                    question_id,
                )
            )
        }

        "get_category_suggestions" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            let category: String = get_arg(&args, "category")?;
            route_async!(
                cmd,
                commands::wizard::get_category_suggestions(
                    &state.data_dir,
                    &state.catalog,
                    state.suggestions.as_ref(),
                    client_id,
                    draft_id,
                    category,
                )
            )
        }

        "get_wizard_progress" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            route_async!(
                cmd,
                commands::wizard::get_wizard_progress(
                    &state.data_dir,
                    &state.catalog,
                    client_id,
                    draft_id,
                )
            )
        }

        _ => Err(format!("Unknown wizard command: {}", cmd)),
    }
}

/// Check if a command is a wizard flow command
pub fn is_wizard_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "start_wizard"
            | "get_wizard_questions"
            | "record_response"
            | "advance_category"
            | "finalize_draft"
            | "submit_brief"
            | "get_suggestion"
            | "get_category_suggestions"
            | "get_wizard_progress"
    )
}
