// src/puzzle.rs
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::catalog::{Catalog, Difficulty};
use crate::client::ExecutionClient;
use crate::errors::Result;
use crate::models::{AnnotatedLine, CodeLine, ExecutionRequest, ExecutionResult};

pub const SUCCESS_PREFIX: &str = "✅ 実行結果:\n";
pub const ERROR_PREFIX: &str = "❌ エラー: ";
pub const SERVER_ERROR_MESSAGE: &str = "⚠️ サーバーエラーが発生しました";

/// State of one learner's puzzle: the chosen level, the current line order
/// and the last execution output.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    catalog: Arc<Catalog>,
    difficulty: Difficulty,
    lines: Vec<CodeLine>,
    output: String,
    loading: bool,
}

impl PuzzleSession {
    /// Starts on the default level with its lines already shuffled.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_difficulty(catalog, Difficulty::default())
    }

    /// Starts on `level` with its lines already shuffled.
    pub fn with_difficulty(catalog: Arc<Catalog>, level: Difficulty) -> Self {
        let mut session = Self {
            catalog,
            difficulty: level,
            lines: Vec::new(),
            output: String::new(),
            loading: false,
        };
        session.select_difficulty(level);
        session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn select_difficulty(&mut self, level: Difficulty) {
        self.select_difficulty_with(level, &mut rand::thread_rng());
    }

    /// Loads the canonical lines for `level` in a random order and clears the output.
    /// Ids are `{level}-{index}` with the index into the canonical order.
    pub fn select_difficulty_with<R: Rng + ?Sized>(&mut self, level: Difficulty, rng: &mut R) {
        let mut lines: Vec<CodeLine> = self
            .catalog
            .lines(level)
            .iter()
            .enumerate()
            .map(|(i, text)| CodeLine {
                id: format!("{}-{}", level, i),
                text: text.clone(),
            })
            .collect();
        lines.shuffle(rng);

        self.difficulty = level;
        self.lines = lines;
        self.output.clear();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Randomizes the order of the current lines. Ids and texts stay paired.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.lines.shuffle(rng);
    }

    /// Moves the line at `source` to `destination`.
    ///
    /// A missing destination (a drag dropped outside the list) or an index
    /// outside the list leaves the order untouched. Returns whether a move happened.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            return false;
        };
        if source >= self.lines.len() || destination >= self.lines.len() {
            return false;
        }
        let line = self.lines.remove(source);
        self.lines.insert(destination, line);
        true
    }

    /// The current order joined with newlines.
    pub fn code(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the lines are back in canonical order.
    pub fn is_solved(&self) -> bool {
        let canonical = self.catalog.lines(self.difficulty);
        canonical.len() == self.lines.len()
            && canonical.iter().zip(&self.lines).all(|(c, line)| *c == line.text)
    }

    /// Current lines with their hover text.
    pub fn annotated_lines(&self) -> Vec<AnnotatedLine> {
        self.lines
            .iter()
            .map(|line| {
                let found = self.catalog.annotations(&line.text);
                AnnotatedLine {
                    id: line.id.clone(),
                    text: line.text.clone(),
                    annotation: (!found.is_empty()).then(|| found.join(" / ")),
                }
            })
            .collect()
    }

    /// Enters the loading state and returns the request to send.
    /// Returns `None` while a previous run is still in flight.
    pub fn begin_run(&mut self) -> Option<ExecutionRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.output.clear();
        Some(ExecutionRequest { code: self.code() })
    }

    /// Renders the outcome of a run and leaves the loading state.
    pub fn finish_run(&mut self, outcome: Result<ExecutionResult>) {
        self.output = match outcome {
            Ok(ExecutionResult::Success { output }) => format!("{}{}", SUCCESS_PREFIX, output),
            Ok(ExecutionResult::Failure { error }) => format!("{}{}", ERROR_PREFIX, error),
            Err(e) => {
                log::warn!("Execution request failed: {}", e);
                SERVER_ERROR_MESSAGE.to_string()
            }
        };
        self.loading = false;
    }

    /// Submits the current code and renders the result into [`output`](Self::output).
    /// Returns `false` without contacting `client` when a run is already in progress.
    pub async fn run(&mut self, client: &dyn ExecutionClient) -> bool {
        let Some(request) = self.begin_run() else {
            return false;
        };
        let outcome = client.execute(&request).await;
        self.finish_run(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FukuwaraiError;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn session() -> PuzzleSession {
        PuzzleSession::new(Arc::new(Catalog::builtin().unwrap()))
    }

    fn pairs(session: &PuzzleSession) -> HashSet<CodeLine> {
        session.lines().iter().cloned().collect()
    }

    /// Puts the lines back in canonical order using only `reorder`.
    fn solve(session: &mut PuzzleSession) {
        for target in 0..session.lines().len() {
            let id = format!("{}-{}", session.difficulty(), target);
            let source = session.lines().iter().position(|l| l.id == id).unwrap();
            session.reorder(source, Some(target));
        }
    }

    struct RecordingClient {
        requests: Mutex<Vec<ExecutionRequest>>,
        reply: fn() -> Result<ExecutionResult>,
    }

    impl RecordingClient {
        fn new(reply: fn() -> Result<ExecutionResult>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait]
    impl ExecutionClient for RecordingClient {
        async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
            self.requests.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    #[test]
    fn test_select_difficulty_loads_canonical_set() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(7);

        for level in Difficulty::ALL {
            s.select_difficulty_with(level, &mut rng);
            let texts: HashSet<&str> = s.lines().iter().map(|l| l.text.as_str()).collect();
            let canonical: HashSet<&str> =
                s.catalog.lines(level).iter().map(String::as_str).collect();
            assert_eq!(texts, canonical);
            assert_eq!(s.difficulty(), level);
            for line in s.lines() {
                let index: usize = line.id.strip_prefix(&format!("{}-", level)).unwrap().parse().unwrap();
                assert_eq!(s.catalog.lines(level)[index], line.text);
            }
        }
    }

    #[test]
    fn test_select_difficulty_clears_output() {
        let mut s = session();
        s.finish_run(Ok(ExecutionResult::Success { output: "3\n".into() }));
        assert!(!s.output().is_empty());

        s.select_difficulty(Difficulty::Hard);
        assert!(s.output().is_empty());
    }

    #[test]
    fn test_shuffle_preserves_pairs() {
        let mut s = session();
        s.select_difficulty(Difficulty::Hard);
        let before = pairs(&s);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            s.shuffle_with(&mut rng);
            assert_eq!(pairs(&s), before);
        }
    }

    #[test]
    fn test_reorder_moves_a_single_line() {
        let mut s = session();
        s.select_difficulty(Difficulty::Easy);
        let before: Vec<CodeLine> = s.lines().to_vec();

        assert!(s.reorder(0, Some(3)));
        assert_eq!(s.lines()[3], before[0]);
        assert_eq!(&s.lines()[..3], &before[1..]);
        assert_eq!(pairs(&s), before.iter().cloned().collect::<HashSet<_>>());

        assert!(s.reorder(3, Some(0)));
        assert_eq!(s.lines(), before.as_slice());
    }

    #[test]
    fn test_reorder_every_pair_is_a_permutation() {
        let mut s = PuzzleSession::with_difficulty(
            Arc::new(Catalog::builtin().unwrap()),
            Difficulty::Hard,
        );
        let start: Vec<CodeLine> = s.lines().to_vec();
        let expected = pairs(&s);
        let len = start.len();

        for source in 0..len {
            for destination in 0..len {
                s.lines = start.clone();
                assert!(s.reorder(source, Some(destination)));
                assert_eq!(pairs(&s), expected, "move {} -> {}", source, destination);
                assert_eq!(s.lines().len(), len);
                assert_eq!(s.lines()[destination], start[source], "move {} -> {}", source, destination);
            }
        }
    }

    #[test]
    fn test_with_difficulty_starts_on_that_level() {
        let s = PuzzleSession::with_difficulty(
            Arc::new(Catalog::builtin().unwrap()),
            Difficulty::Normal,
        );
        assert_eq!(s.difficulty(), Difficulty::Normal);
        assert_eq!(s.lines().len(), 4);
        assert!(s.lines().iter().all(|l| l.id.starts_with("normal-")));
        assert!(s.output().is_empty());
        assert!(!s.is_loading());
    }

    #[test]
    fn test_reorder_ignores_invalid_moves() {
        let mut s = session();
        let before: Vec<CodeLine> = s.lines().to_vec();

        assert!(!s.reorder(1, None));
        assert!(!s.reorder(99, Some(0)));
        assert!(!s.reorder(0, Some(99)));
        assert_eq!(s.lines(), before.as_slice());
    }

    #[test]
    fn test_solving_restores_canonical_code() {
        let mut s = session();
        s.select_difficulty(Difficulty::Normal);
        solve(&mut s);

        assert!(s.is_solved());
        assert_eq!(
            s.code(),
            "def add(x, y):\n    return x + y\nresult = add(2, 3)\nprint(result)"
        );
    }

    #[test]
    fn test_annotated_lines_join_explanations() {
        let mut s = session();
        s.select_difficulty(Difficulty::Normal);
        solve(&mut s);

        let lines = s.annotated_lines();
        assert_eq!(
            lines[0].annotation.as_deref(),
            Some("def: 新しい関数を定義する / add: 2つの数を足す関数")
        );
        assert_eq!(lines[1].annotation.as_deref(), Some("return: 関数の結果を返す"));

        s.select_difficulty(Difficulty::Easy);
        solve(&mut s);
        assert!(s.annotated_lines()[0].annotation.is_none());
    }

    #[tokio::test]
    async fn test_run_renders_success() {
        let mut s = session();
        solve(&mut s);
        let client = RecordingClient::new(|| Ok(ExecutionResult::Success { output: "3\n".into() }));

        assert!(s.run(&client).await);
        assert_eq!(s.output(), "✅ 実行結果:\n3\n");
        assert!(!s.is_loading());

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].code, "a = 1\nb = 2\nc = a + b\nprint(c)");
    }

    #[tokio::test]
    async fn test_run_renders_failure_and_transport_error() {
        let mut s = session();
        let failing = RecordingClient::new(|| {
            Ok(ExecutionResult::Failure { error: "NameError: name 'c' is not defined".into() })
        });
        s.run(&failing).await;
        assert_eq!(s.output(), "❌ エラー: NameError: name 'c' is not defined");

        let unreachable = RecordingClient::new(|| {
            Err(FukuwaraiError::UnexpectedResponse("connection refused".into()))
        });
        s.run(&unreachable).await;
        assert_eq!(s.output(), SERVER_ERROR_MESSAGE);
        assert!(!s.is_loading());
    }

    #[tokio::test]
    async fn test_run_while_loading_is_ignored() {
        let mut s = session();
        let request = s.begin_run().unwrap();
        assert!(s.is_loading());
        assert!(s.output().is_empty());
        assert_eq!(request.code, s.code());

        let client = RecordingClient::new(|| Ok(ExecutionResult::Success { output: String::new() }));
        assert!(!s.run(&client).await);
        assert!(client.requests.lock().unwrap().is_empty());
        assert!(s.begin_run().is_none());

        s.finish_run(Ok(ExecutionResult::Success { output: "done\n".into() }));
        assert!(!s.is_loading());
        assert!(s.run(&client).await);
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }
}
