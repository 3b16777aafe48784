use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Deferred;

/// One free-response torque puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    pub question: String,
    pub answer: f64,
}

/// The mission's built-in puzzle set.
pub fn default_puzzles() -> Vec<Puzzle> {
    vec![
        Puzzle {
            id: 1,
            question: "Si 3 monedas se colocan a 5 cm a la izquierda del fulcro (posición -5), \
                       ¿en qué posición a la derecha debes colocar 1 moneda para equilibrar?"
                .into(),
            answer: 15.0,
        },
        Puzzle {
            id: 2,
            question: "Una moneda está en la posición +8. Otra está en -4. \
                       ¿Dónde debes colocar una tercera moneda para lograr el equilibrio?"
                .into(),
            answer: -4.0,
        },
        Puzzle {
            id: 3,
            question: "Dos monedas están en la posición -10. \
                       ¿Cuántas monedas debes colocar en la posición +5 para equilibrar?"
                .into(),
            answer: 4.0,
        },
    ]
}

/// How long quiz feedback lingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizTiming {
    /// Delay between a correct answer and the next puzzle.
    pub advance_after: Duration,
    /// How long a wrong-answer message stays up.
    pub retry_feedback_for: Duration,
}

impl Default for QuizTiming {
    fn default() -> Self {
        Self {
            advance_after: Duration::from_millis(2000),
            retry_feedback_for: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizFeedback {
    pub puzzle_id: u32,
    pub correct: bool,
    pub serial: u64,
}

/// Result of `submit_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// Right answer. `completes` is true when it was the last puzzle.
    Correct { puzzle_id: u32, completes: bool },
    Incorrect { puzzle_id: u32 },
    /// Every puzzle is already solved; nothing changed.
    AlreadyComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizTimer {
    Advance,
    ClearFeedback(u64),
}

/// Phase 3: puzzles answered strictly in order.
#[derive(Debug, Clone)]
pub struct QuizModel {
    puzzles: Vec<Puzzle>,
    index: usize,
    correct: usize,
    feedback: Option<QuizFeedback>,
    serial: u64,
    timer: Deferred<QuizTimer>,
    timing: QuizTiming,
}

impl QuizModel {
    pub fn new(puzzles: Vec<Puzzle>, timing: QuizTiming) -> Self {
        Self {
            puzzles,
            index: 0,
            correct: 0,
            feedback: None,
            serial: 0,
            timer: Deferred::new(),
            timing,
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.correct = 0;
        self.feedback = None;
        self.timer.cancel();
    }

    /// Compare `value` with the current puzzle's answer by exact equality.
    pub fn submit_answer(&mut self, value: f64, now: Duration) -> QuizOutcome {
        // A pending advance is applied before the new answer is judged.
        if let Some(QuizTimer::Advance) = self.timer.flush() {
            self.advance();
        }
        let Some(puzzle) = self.current_puzzle() else {
            return QuizOutcome::AlreadyComplete;
        };
        let puzzle_id = puzzle.id;
        let correct = value == puzzle.answer;
        self.serial += 1;
        self.feedback = Some(QuizFeedback {
            puzzle_id,
            correct,
            serial: self.serial,
        });

        if correct {
            self.correct += 1;
            tracing::debug!(puzzle_id, solved = self.correct, "puzzle solved");
            self.timer
                .schedule(now, self.timing.advance_after, QuizTimer::Advance);
            QuizOutcome::Correct {
                puzzle_id,
                completes: self.is_complete(),
            }
        } else {
            tracing::debug!(puzzle_id, value, "wrong answer");
            self.timer.schedule(
                now,
                self.timing.retry_feedback_for,
                QuizTimer::ClearFeedback(self.serial),
            );
            QuizOutcome::Incorrect { puzzle_id }
        }
    }

    /// Apply a due timer. Returns true if the observable state changed.
    pub fn fire_due(&mut self, now: Duration) -> bool {
        match self.timer.fire(now) {
            Some(QuizTimer::Advance) => {
                self.advance();
                true
            }
            Some(QuizTimer::ClearFeedback(serial)) => {
                if self.feedback.is_some_and(|f| f.serial == serial) {
                    self.feedback = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    fn advance(&mut self) {
        self.feedback = None;
        if self.index + 1 < self.puzzles.len() {
            self.index += 1;
            tracing::debug!(index = self.index, "next puzzle");
        }
    }

    /// The puzzle awaiting an answer; `None` once all are solved.
    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        if self.is_complete() {
            None
        } else {
            self.puzzles.get(self.index)
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// `(solved, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.correct, self.puzzles.len())
    }

    pub fn feedback(&self) -> Option<QuizFeedback> {
        self.feedback
    }

    /// True while a correct answer is waiting for its delayed advance.
    pub fn advance_pending(&self) -> bool {
        matches!(self.timer.effect(), Some(QuizTimer::Advance))
    }

    pub fn is_complete(&self) -> bool {
        self.correct == self.puzzles.len()
    }
}
