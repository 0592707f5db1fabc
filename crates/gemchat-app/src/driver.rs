//! The read, send, print loop.

use std::io::Write;

use gemchat_ai::{
    is_termination_token, render_turn, ConversationSession, SessionError, Turn,
};
use gemchat_common::GemchatError;
use gemchat_config::schema::DisplayConfig;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Chat until EOF or a termination token, then print history if asked and
/// close the session.
///
/// Provider failures are reported and the loop keeps going.
pub async fn run<R, W>(
    session: &mut ConversationSession,
    display: &DisplayConfig,
    input: R,
    out: &mut W,
) -> Result<(), GemchatError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", display.user_prompt)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if is_termination_token(&line) {
            break;
        }

        match session.send(line).await {
            Ok(reply) => print_reply(out, display, &reply)?,
            Err(SessionError::EmptyInput) => continue,
            Err(SessionError::Provider(e)) => {
                warn!("request failed: {e}");
                writeln!(out, "{} error: {e}", display.model_prefix)?;
            }
            Err(e) => return Err(GemchatError::Other(e.to_string())),
        }
    }

    if display.print_history {
        print_history(out, session.history())?;
        let usage = session.tracker().total();
        writeln!(
            out,
            "tokens - input: {}, output: {}",
            usage.input_tokens, usage.output_tokens
        )?;
    }
    session.close();
    Ok(())
}

fn print_reply<W: Write>(out: &mut W, display: &DisplayConfig, reply: &Turn) -> std::io::Result<()> {
    if !display.show_parts || reply.metadata().is_none() {
        return writeln!(out, "{} {}", display.model_prefix, reply.content());
    }
    writeln!(out, "{}", display.model_prefix)?;
    for part in render_turn(reply) {
        writeln!(out, "{part}")?;
    }
    Ok(())
}

pub fn print_history<W: Write>(out: &mut W, history: &[Turn]) -> std::io::Result<()> {
    for turn in history {
        writeln!(out, "role - {}: {}", turn.role().as_str(), turn.content())?;
    }
    Ok(())
}
