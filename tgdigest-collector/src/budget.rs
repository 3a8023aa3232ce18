/// Running character budget shared by all channels of a run.
///
/// Admission is greedy and order-sensitive: messages are taken in order
/// while they fit, and the first one that does not fit ends the channel.
/// Once exhausted, no further channel should be collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    ceiling: usize,
    consumed: usize,
    exhausted: bool,
}

#[derive(Debug)]
pub struct Admitted {
    pub budget: Budget,
    pub accepted: Vec<String>,
    /// Messages of this channel left out because the ceiling was hit.
    pub dropped: usize,
}

impl Budget {
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            consumed: 0,
            exhausted: ceiling == 0,
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// True once a message has been refused or the ceiling is reached
    /// exactly.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn admit(self, messages: Vec<String>) -> Admitted {
        let mut budget = self;
        let total = messages.len();
        let mut accepted = Vec::with_capacity(total);

        if !budget.exhausted {
            for message in messages {
                let len = message.chars().count();
                if budget.consumed + len > budget.ceiling {
                    budget.exhausted = true;
                    break;
                }
                budget.consumed += len;
                accepted.push(message);
            }
        }

        if budget.consumed >= budget.ceiling {
            budget.exhausted = true;
        }

        Admitted {
            budget,
            dropped: total - accepted.len(),
            accepted,
        }
    }
}
