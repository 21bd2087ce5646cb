// rules.rs - Birth/survival rule shared by classic and generative cells

/// Next state of a cell given its current state and the influence it received this tick.
///
/// Survival on 2 or 3, birth on exactly 3, death or stays dead otherwise.
pub fn next_state(alive: bool, influence: usize) -> bool {
    match (alive, influence) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false,
    }
}
