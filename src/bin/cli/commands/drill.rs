use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use cihui_lib::session::{AnswerOutcome, Grade, GradeMark, SchedulerConfig, SessionScheduler};
use cihui_lib::study::{answer_matches, choice_options, choose_mode, typed_prompt, StudyDirection, StudyMode};
use cihui_lib::vocabulary::{PoolFilter, VocabularyStore};

use crate::app::App;
use crate::OutputFormat;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSummary {
    pub batches: usize,
    pub answers: usize,
    pub graduated: usize,
}

enum Input {
    Grade(Grade),
    Attempt(String),
    Quit,
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }
    match trimmed.parse::<Grade>() {
        Ok(grade) => Input::Grade(grade),
        Err(_) => Input::Attempt(trimmed.to_string()),
    }
}

fn progress_bar(marks: &[GradeMark]) -> String {
    marks
        .iter()
        .map(|mark| match mark {
            GradeMark::None => '.',
            GradeMark::Hard => 'h',
            GradeMark::Medium => 'm',
            GradeMark::Easy => 'e',
        })
        .collect()
}

pub fn run(
    app: &mut App,
    seed: Option<u64>,
    batches: usize,
    modes: &[StudyMode],
    format: &OutputFormat,
) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = drill(
        &mut app.store,
        app.config.clone(),
        seed,
        batches,
        modes,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => println!(
            "Done: {} batches, {} answers, {} words learned",
            summary.batches, summary.answers, summary.graduated
        ),
    }

    Ok(())
}

/// Generators for batch shuffling and for study mode/direction picks.
/// A seed makes both repeatable.
fn seeded_rngs(seed: Option<u64>) -> (StdRng, StdRng) {
    match seed {
        Some(seed) => (StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed.wrapping_add(1))),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    }
}

/// Read grades from `input` until the last batch finishes, input ends, or
/// the learner quits. Each item is shown in one of the enabled `modes`;
/// anything that is not a grade is taken as an attempt for that mode
/// before asking for the grade.
pub fn drill<S, I, O>(
    store: &mut S,
    config: SchedulerConfig,
    seed: Option<u64>,
    max_batches: usize,
    modes: &[StudyMode],
    input: &mut I,
    output: &mut O,
) -> Result<DrillSummary>
where
    S: VocabularyStore,
    I: BufRead,
    O: Write,
{
    let (batch_rng, mut study_rng) = seeded_rngs(seed);
    let mut scheduler = SessionScheduler::with_rng(config, batch_rng);
    let mut summary = DrillSummary::default();
    let mut lines = input.lines();

    'drill: loop {
        scheduler.discard_missing(&*store);
        if scheduler.is_finished() {
            if summary.batches >= max_batches {
                break;
            }
            let pool = store.fetch_pool(PoolFilter::Due(Utc::now()));
            if scheduler.start_session(pool, store)? == 0 {
                writeln!(output, "Nothing due for review.")?;
                break;
            }
            summary.batches += 1;
        }

        let Some(item) = scheduler.current(&*store) else {
            continue;
        };
        let direction = StudyDirection::random(&mut study_rng);
        let mode = choose_mode(modes, &mut study_rng).unwrap_or(StudyMode::TypedAnswer);
        let prompt = typed_prompt(&item, direction);

        writeln!(output, "[{}] {}", progress_bar(&scheduler.progress()), prompt.prompt)?;
        let options: Vec<String> = if mode == StudyMode::MultipleChoice {
            let pool = store.list_items();
            choice_options(&item, &pool)
                .into_iter()
                .map(|option| typed_prompt(option, direction).expected)
                .collect()
        } else {
            Vec::new()
        };
        for (idx, option) in options.iter().enumerate() {
            writeln!(output, "  {}) {}", idx + 1, option)?;
        }

        let grade = loop {
            output.flush()?;
            let Some(line) = lines.next() else {
                break 'drill;
            };
            match parse_input(&line?) {
                Input::Quit => break 'drill,
                Input::Grade(grade) => break grade,
                Input::Attempt(answer) => {
                    let attempt = match mode {
                        StudyMode::MultipleChoice => {
                            match answer.parse::<usize>().ok().and_then(|n| options.get(n.wrapping_sub(1))) {
                                Some(choice) => Some(choice.clone()),
                                None => {
                                    writeln!(output, "Pick a number from 1 to {}", options.len())?;
                                    continue;
                                }
                            }
                        }
                        StudyMode::FlipCard | StudyMode::AudioFirst => None,
                        StudyMode::TypedAnswer => Some(answer),
                    };
                    match attempt {
                        Some(attempt) if answer_matches(&attempt, &prompt.expected) => {
                            writeln!(output, "Correct. Grade it (e/m/h):")?
                        }
                        _ => writeln!(output, "Answer: {}. Grade it (e/m/h):", prompt.expected)?,
                    }
                }
            }
        };

        summary.answers += 1;
        if let AnswerOutcome::Graduated { next_review_at, .. } = scheduler.answer(grade, store)? {
            summary.graduated += 1;
            writeln!(output, "Learned. Next review {}", next_review_at.format("%Y-%m-%d"))?;
        }
    }

    Ok(summary)
}
