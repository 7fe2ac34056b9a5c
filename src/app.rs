//! Terminal front-end. Each function handles one subcommand and writes its
//! answer to `out`, so the commands can be driven from tests.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;
use word_repetition::export::json::{export_json_to_path, import_json};
use word_repetition::{CardManager, CardStore, Clock, Grade, ReviewSession};

pub fn add<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    word: &str,
    definition: &str,
    out: &mut W,
) -> Result<()> {
    let replaced = manager.exists(learner, word)?;
    manager.create(learner, word, definition)?;
    if replaced {
        writeln!(out, "Replaced {word:?}, its progress starts over.")?;
    } else {
        writeln!(out, "Saved {word:?}.")?;
    }
    Ok(())
}

pub fn delete<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    word: &str,
    out: &mut W,
) -> Result<()> {
    manager.delete(learner, word)?;
    writeln!(out, "Deleted {word:?}!")?;
    Ok(())
}

pub fn exists<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    word: &str,
    out: &mut W,
) -> Result<()> {
    let answer = if manager.exists(learner, word)? { "yes" } else { "no" };
    writeln!(out, "{answer}")?;
    Ok(())
}

pub fn definition<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    word: &str,
    out: &mut W,
) -> Result<()> {
    match manager.definition(learner, word) {
        Ok(text) => writeln!(out, "{text}")?,
        Err(err) if err.is_not_found() => writeln!(out, "{word:?} is not saved.")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn stats<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", manager.stats(learner)?)?;
    Ok(())
}

pub fn export<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let count = export_json_to_path(manager, learner, path)?;
    writeln!(out, "Exported {count} word{} to {:?}", plural(count), path)?;
    Ok(())
}

pub fn import<S: CardStore, C: Clock, W: Write>(
    manager: &CardManager<S, C>,
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let count = import_json(manager, path)?;
    writeln!(out, "Imported {count} word{} from {:?}", plural(count), path)?;
    Ok(())
}

/// Lets the learner review due words until none is left or they quit.
pub fn review<S: CardStore, C: Clock, R: BufRead, W: Write>(
    manager: &CardManager<S, C>,
    learner: i64,
    stdin: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut session = ReviewSession::new(learner);
    loop {
        let phase = session.phase_message();
        let Some(word) = session.next_card(manager)? else {
            break;
        };
        write!(out, "{phase}: {word}")?;
        out.flush()?;
        if read_line(stdin)?.is_none() {
            break;
        }

        session.toggle_definition();
        if let Some(text) = session.current_definition(manager)? {
            writeln!(out, "{text}")?;
        }

        let Some(grade) = ask_grade(stdin, out)? else {
            break;
        };
        session.grade_current(manager, grade)?;
        writeln!(out)?;
    }

    if session.is_completed() {
        writeln!(out, "{}", session.phase_message())?;
    } else {
        writeln!(
            out,
            "Stopped after {} review{}.",
            session.reviewed_count(),
            plural(session.reviewed_count())
        )?;
    }
    Ok(())
}

/// Prompts until a valid grade is entered. `None` on end of input or `q`.
fn ask_grade<R: BufRead, W: Write>(stdin: &mut R, out: &mut W) -> Result<Option<Grade>> {
    loop {
        write!(out, "Grade [a]gain [h]ard [g]ood [e]asy: ")?;
        out.flush()?;
        let Some(answer) = read_line(stdin)? else {
            return Ok(None);
        };
        if answer.trim() == "q" {
            return Ok(None);
        }
        match answer.parse::<Grade>() {
            Ok(grade) => return Ok(Some(grade)),
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

fn read_line<R: BufRead>(stdin: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::io::Cursor;
    use word_repetition::{ManualClock, SchedulerConfig, SqliteCardStore};

    fn manager() -> CardManager<SqliteCardStore, ManualClock> {
        CardManager::new(
            SqliteCardStore::open_in_memory().unwrap(),
            ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap()),
            SchedulerConfig::default(),
        )
        .unwrap()
    }

    fn output(buf: Cursor<Vec<u8>>) -> String {
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn test_review_grades_due_cards() {
        let manager = manager();
        manager.create(1, "alma", "apple").unwrap();
        manager.create(1, "ház", "house").unwrap();

        let mut stdin = Cursor::new("\ng\n\nperfect\ne\n");
        let mut stdout = Cursor::new(Vec::new());
        review(&manager, 1, &mut stdin, &mut stdout).unwrap();

        let text = output(stdout);
        assert!(text.starts_with("Review 1: almaapple\n"));
        assert!(text.contains("Review 2: ház"));
        assert!(text.contains("unknown grade \"perfect\""));
        assert!(text.ends_with("Done: 2 reviews, 0 to relearn\n"));

        let alma = manager.store().get(1, "alma").unwrap().unwrap();
        assert_eq!(alma.interval_days, 1);
        let haz = manager.store().get(1, "ház").unwrap().unwrap();
        assert_eq!(haz.ease, 265);
    }

    #[test]
    fn test_review_stops_at_end_of_input() {
        let manager = manager();
        manager.create(1, "alma", "apple").unwrap();

        let mut stdin = Cursor::new("\n");
        let mut stdout = Cursor::new(Vec::new());
        review(&manager, 1, &mut stdin, &mut stdout).unwrap();

        assert!(output(stdout).ends_with("Stopped after 0 reviews.\n"));
        assert_eq!(manager.next_due(1).unwrap().as_deref(), Some("alma"));
    }

    #[test]
    fn test_review_with_nothing_due() {
        let manager = manager();
        let mut stdin = Cursor::new("");
        let mut stdout = Cursor::new(Vec::new());
        review(&manager, 1, &mut stdin, &mut stdout).unwrap();

        assert_eq!(output(stdout), "Done: 0 reviews, 0 to relearn\n");
    }

    #[test]
    fn test_add_then_delete() {
        let manager = manager();
        let mut stdout = Cursor::new(Vec::new());
        add(&manager, 1, "alma", "apple", &mut stdout).unwrap();
        add(&manager, 1, "alma", "apple tree", &mut stdout).unwrap();
        exists(&manager, 1, "alma", &mut stdout).unwrap();
        delete(&manager, 1, "alma", &mut stdout).unwrap();
        delete(&manager, 1, "alma", &mut stdout).unwrap();
        definition(&manager, 1, "alma", &mut stdout).unwrap();

        assert_eq!(
            output(stdout),
            "Saved \"alma\".\n\
             Replaced \"alma\", its progress starts over.\n\
             yes\n\
             Deleted \"alma\"!\n\
             Deleted \"alma\"!\n\
             \"alma\" is not saved.\n"
        );
    }
}
