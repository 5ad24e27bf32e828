//! Run Session use case.
//!
//! Drives a [`SessionMachine`] over one exam, turning its decisions into
//! calls on the [`SessionInteraction`] and [`Narrator`] ports.
//!
//! Everything is sequential: narration is awaited before the next action is
//! read, and no second narration can be requested while one is playing.

use crate::config::SessionParams;
use crate::ports::narrator::Narrator;
use crate::ports::session_interaction::{InteractionError, SessionInteraction, SessionNotice};
use mock_exam_domain::{
    Advance, AnswerOutcome, BlockActionOutcome, Exam, SessionError, SessionMachine,
    SessionReport,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a session abnormally.
#[derive(Error, Debug)]
pub enum RunSessionError {
    #[error("Interaction error: {0}")]
    Interaction(#[from] InteractionError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Use case for taking one exam.
pub struct RunSessionUseCase {
    narrator: Arc<dyn Narrator>,
    params: SessionParams,
}

impl Clone for RunSessionUseCase {
    fn clone(&self) -> Self {
        Self {
            narrator: self.narrator.clone(),
            params: self.params.clone(),
        }
    }
}

impl RunSessionUseCase {
    pub fn new(narrator: Arc<dyn Narrator>) -> Self {
        Self {
            narrator,
            params: SessionParams::default(),
        }
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    /// Run the session to completion or abort.
    ///
    /// A closed input stream is treated as a quit: the partial report is
    /// returned instead of an error.
    pub async fn execute(
        &self,
        exam: &Exam,
        interaction: &dyn SessionInteraction,
    ) -> Result<SessionReport, RunSessionError> {
        info!("Starting session with {} questions", exam.len());

        let mut machine = SessionMachine::new(exam);
        interaction.session_started(exam.len()).await;

        match self.drive(&mut machine, interaction).await {
            Ok(()) => {}
            Err(RunSessionError::Interaction(InteractionError::Closed)) => {
                warn!("Input closed mid-session, ending early");
                machine.abort();
            }
            Err(e) => return Err(e),
        }

        let report = machine.report();
        info!(
            "Session ended ({:?}): {}/{} with {} answered",
            report.outcome, report.score, report.total, report.answered
        );
        interaction.show_report(&report).await;
        Ok(report)
    }

    async fn drive(
        &self,
        machine: &mut SessionMachine<'_>,
        interaction: &dyn SessionInteraction,
    ) -> Result<(), RunSessionError> {
        while !machine.is_finished() {
            let presentation = machine.present()?;
            let in_block = presentation.unit.is_listening_block();
            debug!(
                "Presenting questions {}..={} [{}]",
                presentation.first_number(),
                presentation.last_number(),
                presentation.section()
            );
            interaction.show_unit(&presentation).await;

            if in_block {
                self.review_block(machine, interaction).await?;
            }

            if !self.answer_unit(machine, interaction, in_block).await? {
                info!("Session aborted by user");
                return Ok(());
            }
        }
        Ok(())
    }

    /// Handle block actions until the user starts answering.
    async fn review_block(
        &self,
        machine: &mut SessionMachine<'_>,
        interaction: &dyn SessionInteraction,
    ) -> Result<(), RunSessionError> {
        loop {
            let action = interaction.choose_block_action().await?;
            match machine.block_action(action)? {
                BlockActionOutcome::Narrate { transcript } => {
                    interaction
                        .show_notice(&SessionNotice::NarrationStarted)
                        .await;
                    if let Err(e) = self
                        .narrator
                        .narrate(transcript, &self.params.narration_language)
                        .await
                    {
                        warn!("Narration failed: {}", e);
                        interaction
                            .show_notice(&SessionNotice::NarrationFailed(e.to_string()))
                            .await;
                    }
                }
                BlockActionOutcome::NarrationAlreadyUsed => {
                    interaction
                        .show_notice(&SessionNotice::NarrationAlreadyUsed)
                        .await;
                }
                BlockActionOutcome::Transcript(transcript) => {
                    interaction.show_transcript(transcript).await;
                }
                BlockActionOutcome::Answering => return Ok(()),
            }
        }
    }

    /// Answer every record of the current unit.
    ///
    /// Returns `false` when the user quit.
    async fn answer_unit(
        &self,
        machine: &mut SessionMachine<'_>,
        interaction: &dyn SessionInteraction,
        in_block: bool,
    ) -> Result<bool, RunSessionError> {
        while let Some((position, question)) = machine.current_question() {
            let input = interaction.read_answer(position, question, in_block).await?;
            let feedback = match machine.answer(input)? {
                AnswerOutcome::Aborted => return Ok(false),
                AnswerOutcome::Graded(feedback) => feedback,
            };
            interaction.show_feedback(&feedback).await;

            match machine.acknowledge()? {
                Advance::NextInUnit => continue,
                Advance::NextUnit | Advance::Completed => {
                    interaction.finish_unit().await?;
                    break;
                }
            }
        }
        Ok(true)
    }
}
