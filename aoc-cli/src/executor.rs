//! Command execution: solving, caching, descriptions and status

use crate::cache::InputCache;
use crate::cli::{Command, SubmitMode};
use crate::error::CliError;
use crate::output::OutputFormatter;
use aoc_http_client::AocClient;
use aoc_solver::{DAYS_PER_YEAR, FixtureOutcome, SolutionRegistry, check_part};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Asks the user a yes/no question before an answer is submitted
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<bool>,
{
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self(question)
    }
}

/// Reads the reply from stdin; only `y` or `yes` agrees
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", question)?;
        stdout.flush()?;

        let mut reply = String::new();
        io::stdin().lock().read_line(&mut reply)?;
        Ok(matches!(
            reply.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Runs CLI commands for one puzzle year
pub struct Executor<W> {
    year: u16,
    registry: SolutionRegistry,
    client: AocClient,
    cache: InputCache,
    output: OutputFormatter<W>,
}

impl<W: Write> Executor<W> {
    pub fn new(
        registry: SolutionRegistry,
        client: AocClient,
        cache: InputCache,
        output: OutputFormatter<W>,
    ) -> Self {
        Self {
            year: client.year(),
            registry,
            client,
            cache,
            output,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> OutputFormatter<W> {
        self.output
    }

    pub fn execute(&mut self, command: Command, confirm: &mut dyn Confirm) -> Result<(), CliError> {
        tracing::debug!(year = self.year, ?command, "executing");
        match command {
            Command::Run { day, submit } => self.run(day, submit, confirm),
            Command::Cache => self.cache_all(),
            Command::Markdown { day, output } => self.markdown(day, output.as_deref()),
            Command::Status { day } => self.status(day),
        }
    }

    /// Cached input for a day, fetched on a miss
    fn input(&self, day: u8) -> Result<String, CliError> {
        self.cache
            .get_or_fetch(self.year, day, || self.client.get_input(day))
    }

    /// Solve a day on its real input, check the examples and submit what
    /// is eligible
    ///
    /// A part is submitted only when it has an answer, all of its examples
    /// pass and the day has fewer stars than the part number.
    fn run(&mut self, day: u8, mode: SubmitMode, confirm: &mut dyn Confirm) -> Result<(), CliError> {
        // Fail on an unknown day before touching the network
        let fixtures = self.registry.fixtures(day)?;

        let input = self.input(day)?;
        let result = self.registry.run(day, &input)?;
        self.output.print_answers(day, &result)?;

        let mut examples_pass = [true; 2];
        if fixtures.is_empty() {
            self.output.print_no_examples(day)?;
        } else {
            for part in [1u8, 2] {
                let outcomes = check_part(&self.registry, day, part)?;
                for outcome in &outcomes {
                    self.output.print_fixture(outcome)?;
                }
                examples_pass[usize::from(part - 1)] =
                    outcomes.iter().all(FixtureOutcome::passed);
            }
        }

        let mut stars = self.client.get_star_count(day)?;
        self.output.print_stars(day, stars)?;

        for part in [1u8, 2] {
            let Some(answer) = result.answers.get(part) else {
                continue;
            };
            if !examples_pass[usize::from(part - 1)] || stars >= part {
                tracing::debug!(day, part, stars, "not eligible for submission");
                continue;
            }

            let submit = match mode {
                SubmitMode::Never => false,
                SubmitMode::Always => true,
                SubmitMode::Ask => confirm.confirm(&format!("Submit part {}? (y/n)", part))?,
            };
            if !submit {
                continue;
            }

            let submission = self.client.submit_answer(day, part, answer)?;
            self.output.print_submission(part, &submission)?;
            if submission.is_correct() {
                stars = stars.max(part);
            }
        }
        Ok(())
    }

    /// Fetch every day's input in order until one is unavailable
    fn cache_all(&mut self) -> Result<(), CliError> {
        for day in 1..=DAYS_PER_YEAR as u8 {
            match self.input(day) {
                Ok(_) => self.output.print_cached(self.year, day)?,
                Err(e) => {
                    tracing::warn!(day, error = %e, "stopping at first unavailable input");
                    break;
                }
            }
        }
        Ok(())
    }

    fn markdown(&mut self, day: u8, output: Option<&Path>) -> Result<(), CliError> {
        let markdown = self.client.get_markdown(day)?;
        match output {
            Some(path) => {
                std::fs::write(path, format!("{markdown}\n"))?;
                tracing::info!(day, path = %path.display(), "wrote description");
            }
            None => self.output.print_text(&markdown)?,
        }
        Ok(())
    }

    fn status(&mut self, day: u8) -> Result<(), CliError> {
        let stars = self.client.get_star_count(day)?;
        self.output.print_stars(day, stars)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_http_client::ClientConfig;
    use aoc_solver::{Fixtures, RegistryBuilder, Solution, SolveError, TestCase};
    use mockito::{Matcher, Server, ServerGuard};
    use tempfile::TempDir;

    const UNSOLVED_PAGE: &str = r#"<html><body><main><article class="day-desc"><h2>--- Day 1: Sums ---</h2><p>Add the <em>numbers</em>.</p></article><form method="post" action="1/answer"></form></main></body></html>"#;
    const HALF_SOLVED_PAGE: &str = r#"<html><body><main><article class="day-desc"><p>One</p></article><p class="day-success">The first half of this puzzle is complete!</p><form method="post"></form></main></body></html>"#;
    const CORRECT_PAGE: &str = r#"<html><body><main><article><p>That's the right answer! <a href="/2023/day/1">[Return to Day 1]</a></p></article></main></body></html>"#;

    fn sum(input: &str) -> Result<String, SolveError> {
        input
            .lines()
            .map(|l| l.trim().parse::<i64>())
            .sum::<Result<i64, _>>()
            .map(|s| s.to_string())
            .map_err(|e| SolveError::InvalidInput(e.to_string()))
    }

    fn count(input: &str) -> Result<String, SolveError> {
        Ok(input.lines().count().to_string())
    }

    fn registry(fixtures: Fixtures) -> SolutionRegistry {
        RegistryBuilder::new()
            .register(1, Solution::split(sum, count), fixtures)
            .unwrap()
            .build()
    }

    const PASSING: Fixtures = Fixtures {
        part1: &[TestCase::new("1\n2\n", "3")],
        part2: &[TestCase::new("1\n2\n", "2")],
    };

    fn executor(
        server: &ServerGuard,
        inputs: &TempDir,
        fixtures: Fixtures,
    ) -> Executor<Vec<u8>> {
        let client = AocClient::builder(ClientConfig::new(2023, "test-session"))
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();
        Executor::new(
            registry(fixtures),
            client,
            InputCache::new(inputs.path()),
            OutputFormatter::new(Vec::new()),
        )
    }

    fn printed(executor: Executor<Vec<u8>>) -> String {
        String::from_utf8(executor.into_output().into_inner()).unwrap()
    }

    fn never_asked(question: &str) -> io::Result<bool> {
        panic!("unexpected prompt: {question}")
    }

    fn answer_mock(server: &mut ServerGuard, level: &str, answer: &str) -> mockito::Mock {
        server
            .mock("POST", "/2023/day/1/answer")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("level".into(), level.into()),
                Matcher::UrlEncoded("answer".into(), answer.into()),
            ]))
            .with_status(200)
            .with_body(CORRECT_PAGE)
    }

    #[test]
    fn test_run_without_submitting() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        let input_mock = server
            .mock("GET", "/2023/day/1/input")
            .with_status(200)
            .with_body("10\n20\n5\n")
            .expect(1)
            .create();
        server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(UNSOLVED_PAGE)
            .create();
        let post = server.mock("POST", Matcher::Any).expect(0).create();

        let mut executor = executor(&server, &inputs, PASSING);
        let run = Command::Run {
            day: 1,
            submit: SubmitMode::Never,
        };
        executor.execute(run.clone(), &mut never_asked).unwrap();
        // Second run is served from the cache
        executor.execute(run, &mut never_asked).unwrap();

        input_mock.assert();
        post.assert();
        let text = printed(executor);
        assert!(text.contains("Part 1: 35"));
        assert!(text.contains("Part 2: 3"));
        assert!(text.contains("✓ Part 1 example: 3 == 3"));
        assert!(text.contains("You have 0 stars on day 1"));
        assert_eq!(
            std::fs::read_to_string(inputs.path().join("2023").join("1.txt")).unwrap(),
            "10\n20\n5\n"
        );
    }

    #[test]
    fn test_always_submits_each_part_with_its_own_answer() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_body("4\n4\n")
            .create();
        server
            .mock("GET", "/2023/day/1")
            .with_body(UNSOLVED_PAGE)
            .create();
        let part1 = answer_mock(&mut server, "1", "8").expect(1).create();
        let part2 = answer_mock(&mut server, "2", "2").expect(1).create();

        let mut executor = executor(&server, &inputs, PASSING);
        executor
            .execute(
                Command::Run {
                    day: 1,
                    submit: SubmitMode::Always,
                },
                &mut never_asked,
            )
            .unwrap();

        part1.assert();
        part2.assert();
        let text = printed(executor);
        assert!(text.contains("Part 1: ✓ Correct"));
        assert!(text.contains("Part 2: ✓ Correct"));
        assert!(!text.contains("[Return"));
    }

    #[test]
    fn test_failing_example_and_earned_star_block_submission() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_body("1\n")
            .create();
        server
            .mock("GET", "/2023/day/1")
            .with_body(HALF_SOLVED_PAGE)
            .create();
        let post = server.mock("POST", Matcher::Any).expect(0).create();

        const WRONG_PART2: Fixtures = Fixtures {
            part1: &[TestCase::new("1\n2\n", "3")],
            part2: &[TestCase::new("1\n2\n", "7")],
        };
        let mut executor = executor(&server, &inputs, WRONG_PART2);
        executor
            .execute(
                Command::Run {
                    day: 1,
                    submit: SubmitMode::Always,
                },
                &mut never_asked,
            )
            .unwrap();

        post.assert();
        let text = printed(executor);
        assert!(text.contains("✗ Part 2 example: 2 != 7"));
        assert!(text.contains("You have 1 stars on day 1"));
    }

    #[test]
    fn test_ask_mode_prompts_per_part() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_body("1\n")
            .create();
        server
            .mock("GET", "/2023/day/1")
            .with_body(UNSOLVED_PAGE)
            .create();
        let part1 = answer_mock(&mut server, "1", "1").expect(1).create();
        let part2 = answer_mock(&mut server, "2", "1").expect(0).create();

        let mut questions = Vec::new();
        let mut confirm = |question: &str| -> io::Result<bool> {
            questions.push(question.to_string());
            Ok(question.contains("part 1"))
        };

        let mut executor = executor(&server, &inputs, PASSING);
        executor
            .execute(
                Command::Run {
                    day: 1,
                    submit: SubmitMode::Ask,
                },
                &mut confirm,
            )
            .unwrap();

        part1.assert();
        part2.assert();
        assert_eq!(questions, ["Submit part 1? (y/n)", "Submit part 2? (y/n)"]);
    }

    #[test]
    fn test_day_without_examples_is_still_submitted() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_body("2\n3\n")
            .create();
        server
            .mock("GET", "/2023/day/1")
            .with_body(UNSOLVED_PAGE)
            .create();
        let part1 = answer_mock(&mut server, "1", "5").expect(1).create();
        let part2 = answer_mock(&mut server, "2", "2").expect(1).create();

        let mut executor = executor(&server, &inputs, Fixtures::NONE);
        executor
            .execute(
                Command::Run {
                    day: 1,
                    submit: SubmitMode::Always,
                },
                &mut never_asked,
            )
            .unwrap();

        part1.assert();
        part2.assert();
        let text = printed(executor);
        assert!(text.contains("No examples registered for day 1"));
        assert!(!text.contains("example:"));
    }

    #[test]
    fn test_unknown_day_fails_before_fetching() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        let any = server.mock("GET", Matcher::Any).expect(0).create();

        let mut executor = executor(&server, &inputs, PASSING);
        let err = executor
            .execute(
                Command::Run {
                    day: 2,
                    submit: SubmitMode::Never,
                },
                &mut never_asked,
            )
            .unwrap_err();

        any.assert();
        assert!(matches!(
            err,
            CliError::Solver(aoc_solver::SolverError::NotFound(2))
        ));
    }

    #[test]
    fn test_fetch_failure_names_the_day() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_status(400)
            .create();

        let mut executor = executor(&server, &inputs, PASSING);
        let err = executor
            .execute(
                Command::Run {
                    day: 1,
                    submit: SubmitMode::Never,
                },
                &mut never_asked,
            )
            .unwrap_err();

        assert!(matches!(err, CliError::InputFetch { day: 1, .. }));
    }

    #[test]
    fn test_cache_stops_at_first_unavailable_day() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1/input")
            .with_body("one")
            .create();
        server
            .mock("GET", "/2023/day/2/input")
            .with_body("two")
            .create();
        let day3 = server
            .mock("GET", "/2023/day/3/input")
            .with_status(404)
            .expect(1)
            .create();
        let day4 = server
            .mock("GET", "/2023/day/4/input")
            .with_body("four")
            .expect(0)
            .create();

        let mut executor = executor(&server, &inputs, PASSING);
        executor.execute(Command::Cache, &mut never_asked).unwrap();

        day3.assert();
        day4.assert();
        let year_dir = inputs.path().join("2023");
        assert!(year_dir.join("1.txt").is_file());
        assert!(year_dir.join("2.txt").is_file());
        assert!(!year_dir.join("3.txt").exists());
        assert_eq!(printed(executor), "2023/01: cached\n2023/02: cached\n");
    }

    #[test]
    fn test_markdown_to_file_and_stdout() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1")
            .with_body(UNSOLVED_PAGE)
            .expect(2)
            .create();

        let target = inputs.path().join("day1.md");
        let mut executor = executor(&server, &inputs, PASSING);
        executor
            .execute(
                Command::Markdown {
                    day: 1,
                    output: Some(target.clone()),
                },
                &mut never_asked,
            )
            .unwrap();
        executor
            .execute(
                Command::Markdown {
                    day: 1,
                    output: None,
                },
                &mut never_asked,
            )
            .unwrap();

        let expected = "## --- Day 1: Sums ---\n\nAdd the *numbers*.\n";
        assert_eq!(std::fs::read_to_string(&target).unwrap(), expected);
        assert_eq!(printed(executor), expected);
    }

    #[test]
    fn test_status() {
        let mut server = Server::new();
        let inputs = TempDir::new().unwrap();
        server
            .mock("GET", "/2023/day/1")
            .with_body(HALF_SOLVED_PAGE)
            .create();

        let mut executor = executor(&server, &inputs, PASSING);
        executor
            .execute(Command::Status { day: 1 }, &mut never_asked)
            .unwrap();
        assert_eq!(printed(executor), "You have 1 stars on day 1\n");
    }
}
