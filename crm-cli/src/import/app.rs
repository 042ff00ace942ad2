//! Import Wizard - update logic
//!
//! Elm-style reducer: `update` applies one message to the state and returns
//! the effect to run. The reducer never performs I/O; network calls are
//! described by `Command` and their results come back as messages tagged
//! with the session they belong to.

use log::{debug, info, warn};

use crate::api::models::{ColumnAnalysis, ImportSummary};

use super::command::Command;
use super::error::ImportError;
use super::file::SpreadsheetFile;
use super::msg::Msg;
use super::state::{ImportOutcome, ImportStep, MappingState, State, UploadState};

/// Import wizard: upload, map columns, see the result
pub struct ImportWizard;

impl ImportWizard {
    pub fn init() -> State {
        let state = State::new();
        debug!("Import session {} opened", state.session_id);
        state
    }

    pub fn update(state: &mut State, msg: Msg) -> Command {
        match msg {
            Msg::SelectFile(file) => handle_select_file(state, file),
            Msg::CheckCompleted { session, result } => {
                if session != state.session_id {
                    debug!("Dropping check response for stale session {}", session);
                    return Command::None;
                }
                handle_check_completed(state, result)
            }
            Msg::SetMapping { column, target } => {
                if let ImportStep::Mapping(mapping) = &mut state.step {
                    if mapping.submitting {
                        return Command::None;
                    }
                    match mapping.set_mapping(&column, target) {
                        Ok(()) => mapping.error = None,
                        Err(e) => mapping.error = Some(e),
                    }
                }
                Command::None
            }
            Msg::Submit => handle_submit(state),
            Msg::ConfirmCompleted { session, result } => {
                if session != state.session_id {
                    debug!("Dropping confirm response for stale session {}", session);
                    return Command::None;
                }
                handle_confirm_completed(state, result)
            }
            Msg::Back => {
                if let ImportStep::Mapping(mapping) = &state.step {
                    if !mapping.submitting {
                        debug!("Session {}: back to upload", state.session_id);
                        state.step = ImportStep::Upload(UploadState::default());
                    }
                }
                Command::None
            }
            Msg::Close => handle_close(state),
            Msg::DismissError => {
                match &mut state.step {
                    ImportStep::Upload(upload) => upload.error = None,
                    ImportStep::Mapping(mapping) => mapping.error = None,
                    ImportStep::Result(_) => {}
                }
                Command::None
            }
        }
    }
}

fn handle_select_file(state: &mut State, file: SpreadsheetFile) -> Command {
    let ImportStep::Upload(upload) = &mut state.step else {
        return Command::None;
    };

    if upload.is_checking() {
        debug!("Ignoring {}: a file is already being checked", file.name);
        return Command::None;
    }

    if !file.is_accepted() {
        warn!(
            "Rejected {} (media type {:?}): unsupported format",
            file.name, file.media_type
        );
        upload.error = Some(ImportError::UnsupportedFormat {
            file_name: file.name,
        });
        return Command::None;
    }

    info!("Session {}: checking {}", state.session_id, file.name);
    upload.checking = Some(file.name.clone());
    upload.error = None;

    Command::Check {
        session: state.session_id,
        file,
    }
}

fn handle_check_completed(
    state: &mut State,
    result: Result<ColumnAnalysis, ImportError>,
) -> Command {
    let ImportStep::Upload(upload) = &mut state.step else {
        return Command::None;
    };
    if !upload.is_checking() {
        return Command::None;
    }

    match result {
        Ok(analysis)
            if analysis.file_token.trim().is_empty()
                || analysis.file_extension.trim().is_empty() =>
        {
            warn!("Check response carried no file token or extension");
            upload.checking = None;
            upload.error = Some(ImportError::Check(
                "The server did not return a file token and extension".to_string(),
            ));
        }
        Ok(analysis) => {
            info!(
                "Session {}: {} columns matched, {} need a decision",
                state.session_id,
                analysis.matched_columns.len(),
                analysis.unmatched_excel_columns.len()
            );
            state.step = ImportStep::Mapping(MappingState::from_analysis(analysis));
        }
        Err(e) => {
            upload.checking = None;
            upload.error = Some(e);
        }
    }

    Command::None
}

fn handle_submit(state: &mut State) -> Command {
    let ImportStep::Mapping(mapping) = &mut state.step else {
        return Command::None;
    };
    if mapping.submitting || mapping.file.token.is_empty() {
        return Command::None;
    }

    let request = mapping.confirm_request();
    info!(
        "Session {}: submitting {} mapped columns ({} skipped)",
        state.session_id,
        request.mapping.len(),
        mapping.skipped_columns().len()
    );
    mapping.submitting = true;
    mapping.error = None;

    Command::Confirm {
        session: state.session_id,
        request,
    }
}

fn handle_confirm_completed(
    state: &mut State,
    result: Result<ImportSummary, ImportError>,
) -> Command {
    let ImportStep::Mapping(mapping) = &mut state.step else {
        return Command::None;
    };
    if !mapping.submitting {
        return Command::None;
    }

    match result {
        Ok(summary) => {
            let outcome = ImportOutcome::from(summary);
            info!(
                "Session {}: imported {} rows, {} row errors",
                state.session_id,
                outcome.imported_count,
                outcome.row_errors.len()
            );
            state.step = ImportStep::Result(outcome);
        }
        Err(e) => {
            mapping.submitting = false;
            mapping.error = Some(e);
        }
    }

    Command::None
}

fn handle_close(state: &mut State) -> Command {
    let outcome = match &state.step {
        ImportStep::Result(outcome) => Some(outcome.clone()),
        _ => None,
    };

    if state.is_busy() {
        debug!(
            "Session {} closed with a request in flight; its response will be dropped",
            state.session_id
        );
    }

    *state = State::new();
    Command::Closed { outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::MatchedColumn;
    use crate::import::state::StepKind;

    fn xlsx(name: &str) -> SpreadsheetFile {
        SpreadsheetFile::new(
            name,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            b"PK".to_vec(),
        )
    }

    fn scenario_analysis() -> ColumnAnalysis {
        ColumnAnalysis {
            file_token: "tok-1".to_string(),
            file_extension: ".xlsx".to_string(),
            matched_columns: vec![MatchedColumn::new("Ragione Sociale", "ragione_sociale")],
            unmatched_excel_columns: vec!["Note interne".to_string()],
            all_db_columns: vec![
                "ragione_sociale".to_string(),
                "p_iva".to_string(),
                "tipologia".to_string(),
            ],
        }
    }

    /// Drive a fresh wizard into the mapping step
    fn in_mapping() -> State {
        let mut state = ImportWizard::init();
        let cmd = ImportWizard::update(&mut state, Msg::SelectFile(xlsx("clients.xlsx")));
        assert!(matches!(cmd, Command::Check { .. }));
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session,
                result: Ok(scenario_analysis()),
            },
        );
        state
    }

    fn mapping(state: &State) -> &MappingState {
        match &state.step {
            ImportStep::Mapping(m) => m,
            other => panic!("expected mapping step, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_rejected_file_makes_no_request() {
        let mut state = ImportWizard::init();
        for file in [
            SpreadsheetFile::new("contract.pdf", "application/pdf", vec![]),
            SpreadsheetFile::new("notes.txt", "text/plain", vec![]),
            SpreadsheetFile::new("data", "", vec![]),
        ] {
            let cmd = ImportWizard::update(&mut state, Msg::SelectFile(file));
            assert_eq!(cmd, Command::None);
            assert_eq!(state.step_kind(), StepKind::Upload);
            assert!(matches!(
                state.error(),
                Some(ImportError::UnsupportedFormat { .. })
            ));
            assert!(!state.is_busy());
        }
    }

    #[test]
    fn test_csv_accepted_by_extension_with_odd_mime() {
        let mut state = ImportWizard::init();
        let file = SpreadsheetFile::new("clienti.csv", "application/octet-stream", vec![]);
        let cmd = ImportWizard::update(&mut state, Msg::SelectFile(file));
        assert!(matches!(cmd, Command::Check { .. }));
        assert!(state.is_busy());
    }

    #[test]
    fn test_second_file_ignored_while_checking() {
        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("a.xlsx")));
        let cmd = ImportWizard::update(&mut state, Msg::SelectFile(xlsx("b.xlsx")));
        assert_eq!(cmd, Command::None);

        let ImportStep::Upload(upload) = &state.step else {
            panic!("expected upload step");
        };
        assert_eq!(upload.checking.as_deref(), Some("a.xlsx"));
    }

    #[test]
    fn test_scenario_a_check_success_enters_mapping() {
        let state = in_mapping();
        let m = mapping(&state);

        assert_eq!(m.file.token, "tok-1");
        assert_eq!(m.file.extension, ".xlsx");
        assert_eq!(
            m.matched_columns,
            vec![MatchedColumn::new("Ragione Sociale", "ragione_sociale")]
        );
        assert_eq!(m.unmatched_columns, vec!["Note interne"]);
        assert_eq!(m.column_mapping().len(), 1);
        assert_eq!(m.column_mapping().get("Note interne"), Some(&None));
    }

    #[test]
    fn test_scenario_b_submitted_mapping() {
        let mut state = in_mapping();
        ImportWizard::update(
            &mut state,
            Msg::SetMapping {
                column: "Note interne".to_string(),
                target: Some("tipologia".to_string()),
            },
        );

        let cmd = ImportWizard::update(&mut state, Msg::Submit);
        let Command::Confirm { session, request } = cmd else {
            panic!("expected confirm command");
        };
        assert_eq!(session, state.session_id);
        assert_eq!(request.file_token, "tok-1");
        assert_eq!(request.file_extension, ".xlsx");
        assert_eq!(request.mapping.len(), 2);
        assert_eq!(request.mapping["Ragione Sociale"], "ragione_sociale");
        assert_eq!(request.mapping["Note interne"], "tipologia");
    }

    #[test]
    fn test_skipped_columns_never_submitted() {
        let mut state = in_mapping();
        let cmd = ImportWizard::update(&mut state, Msg::Submit);
        let Command::Confirm { request, .. } = cmd else {
            panic!("expected confirm command");
        };
        assert_eq!(request.mapping.len(), 1);
        assert!(!request.mapping.contains_key("Note interne"));
    }

    #[test]
    fn test_scenario_c_result_and_close_reports_outcome() {
        let mut state = in_mapping();
        ImportWizard::update(&mut state, Msg::Submit);
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::ConfirmCompleted {
                session,
                result: Ok(ImportSummary {
                    imported_count: 42,
                    errors: Some(vec!["Row 7: CAP non valido".to_string()]),
                }),
            },
        );

        let ImportStep::Result(outcome) = &state.step else {
            panic!("expected result step");
        };
        assert_eq!(outcome.imported_count, 42);
        assert_eq!(outcome.row_errors, vec!["Row 7: CAP non valido"]);

        let cmd = ImportWizard::update(&mut state, Msg::Close);
        let Command::Closed { outcome: Some(outcome) } = cmd else {
            panic!("expected closed with outcome");
        };
        assert_eq!(outcome.imported_count, 42);
        assert_eq!(state.step_kind(), StepKind::Upload);
    }

    #[test]
    fn test_scenario_d_check_failure_stays_in_upload() {
        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("clients.xlsx")));
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session,
                result: Err(ImportError::Check("File non valido".to_string())),
            },
        );

        assert_eq!(state.step_kind(), StepKind::Upload);
        assert!(!state.is_busy());
        assert_eq!(state.error().map(|e| e.to_string()).as_deref(), Some("File non valido"));
    }

    #[test]
    fn test_confirm_failure_keeps_token_for_retry() {
        let mut state = in_mapping();
        ImportWizard::update(&mut state, Msg::Submit);
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::ConfirmCompleted {
                session,
                result: Err(ImportError::Confirm("Token scaduto".to_string())),
            },
        );

        let m = mapping(&state);
        assert!(!m.submitting);
        assert_eq!(m.file.token, "tok-1");
        assert_eq!(m.error, Some(ImportError::Confirm("Token scaduto".to_string())));

        let cmd = ImportWizard::update(&mut state, Msg::Submit);
        assert!(matches!(cmd, Command::Confirm { .. }));
    }

    #[test]
    fn test_no_resubmit_while_confirming() {
        let mut state = in_mapping();
        assert!(matches!(
            ImportWizard::update(&mut state, Msg::Submit),
            Command::Confirm { .. }
        ));
        assert_eq!(ImportWizard::update(&mut state, Msg::Submit), Command::None);
        assert_eq!(ImportWizard::update(&mut state, Msg::Back), Command::None);
        assert_eq!(state.step_kind(), StepKind::Mapping);
    }

    #[test]
    fn test_no_forward_progress_without_response() {
        let mut state = ImportWizard::init();

        // Submit and confirm completions mean nothing on the upload step
        assert_eq!(ImportWizard::update(&mut state, Msg::Submit), Command::None);
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::ConfirmCompleted {
                session,
                result: Ok(ImportSummary {
                    imported_count: 1,
                    errors: None,
                }),
            },
        );
        assert_eq!(state.step_kind(), StepKind::Upload);

        // A check completion nobody asked for is ignored too
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session,
                result: Ok(scenario_analysis()),
            },
        );
        assert_eq!(state.step_kind(), StepKind::Upload);

        // Mapping step only leaves on a confirm response
        let mut state = in_mapping();
        ImportWizard::update(&mut state, Msg::Submit);
        assert_eq!(state.step_kind(), StepKind::Mapping);
    }

    #[test]
    fn test_empty_token_is_check_failure() {
        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("clients.xlsx")));
        let session = state.session_id;
        let mut analysis = scenario_analysis();
        analysis.file_token = String::new();
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session,
                result: Ok(analysis),
            },
        );

        assert_eq!(state.step_kind(), StepKind::Upload);
        assert!(matches!(state.error(), Some(ImportError::Check(_))));
    }

    #[test]
    fn test_empty_extension_is_check_failure() {
        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("c.xlsx")));
        let session = state.session_id;
        let mut analysis = scenario_analysis();
        analysis.file_token = "tok".to_string();
        analysis.file_extension = String::new();
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session,
                result: Ok(analysis),
            },
        );

        assert_eq!(state.step_kind(), StepKind::Upload);
        assert!(!state.is_busy());
        assert!(matches!(state.error(), Some(ImportError::Check(_))));
    }

    #[test]
    fn test_back_discards_mapping() {
        let mut state = in_mapping();
        ImportWizard::update(
            &mut state,
            Msg::SetMapping {
                column: "Note interne".to_string(),
                target: Some("tipologia".to_string()),
            },
        );
        ImportWizard::update(&mut state, Msg::Back);

        assert_eq!(state.step, ImportStep::Upload(UploadState::default()));
    }

    #[test]
    fn test_invalid_mapping_edit_surfaces_error() {
        let mut state = in_mapping();
        ImportWizard::update(
            &mut state,
            Msg::SetMapping {
                column: "Colonna fantasma".to_string(),
                target: Some("tipologia".to_string()),
            },
        );
        assert!(matches!(state.error(), Some(ImportError::UnknownColumn(_))));
        assert!(!mapping(&state).column_mapping().contains_key("Colonna fantasma"));

        ImportWizard::update(&mut state, Msg::DismissError);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_close_is_idempotent_from_every_step() {
        let fresh = |s: &State| s.step == ImportStep::Upload(UploadState::default());

        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("a.xlsx")));
        assert_eq!(
            ImportWizard::update(&mut state, Msg::Close),
            Command::Closed { outcome: None }
        );
        assert!(fresh(&state));
        assert_eq!(
            ImportWizard::update(&mut state, Msg::Close),
            Command::Closed { outcome: None }
        );
        assert!(fresh(&state));

        let mut state = in_mapping();
        ImportWizard::update(&mut state, Msg::Close);
        assert!(fresh(&state));
        ImportWizard::update(&mut state, Msg::Close);
        assert!(fresh(&state));
    }

    #[test]
    fn test_response_after_close_is_dropped() {
        let mut state = ImportWizard::init();
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("a.xlsx")));
        let old_session = state.session_id;

        ImportWizard::update(&mut state, Msg::Close);
        assert_ne!(state.session_id, old_session);

        // User already picked a new file in the new session
        ImportWizard::update(&mut state, Msg::SelectFile(xlsx("b.xlsx")));
        ImportWizard::update(
            &mut state,
            Msg::CheckCompleted {
                session: old_session,
                result: Ok(scenario_analysis()),
            },
        );

        let ImportStep::Upload(upload) = &state.step else {
            panic!("stale response must not advance the new session");
        };
        assert_eq!(upload.checking.as_deref(), Some("b.xlsx"));
    }

    #[test]
    fn test_result_step_ignores_mapping_actions() {
        let mut state = in_mapping();
        ImportWizard::update(&mut state, Msg::Submit);
        let session = state.session_id;
        ImportWizard::update(
            &mut state,
            Msg::ConfirmCompleted {
                session,
                result: Ok(ImportSummary {
                    imported_count: 3,
                    errors: None,
                }),
            },
        );

        assert_eq!(ImportWizard::update(&mut state, Msg::Back), Command::None);
        assert_eq!(ImportWizard::update(&mut state, Msg::Submit), Command::None);
        assert_eq!(
            ImportWizard::update(&mut state, Msg::SelectFile(xlsx("c.xlsx"))),
            Command::None
        );
        assert_eq!(state.step_kind(), StepKind::Result);
    }
}
