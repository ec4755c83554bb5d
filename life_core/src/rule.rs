// rule.rs - B3/S23 transition

/// State of a cell in the next generation.
pub fn next_state(alive: bool, count: u8) -> bool {
    match (alive, count) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Whether the cell has to be flipped to reach its next state.
pub fn needs_toggle(alive: bool, count: u8) -> bool {
    next_state(alive, count) != alive
}
