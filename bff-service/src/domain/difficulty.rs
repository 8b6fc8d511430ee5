pub const MIN_CATALOG_DIFFICULTY: i64 = 1;
pub const MAX_CATALOG_DIFFICULTY: i64 = 1000;
const WINDOW_HALF_WIDTH: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyWindow {
    pub min: i64,
    pub max: i64,
}

impl DifficultyWindow {
    /// Selection range around `closest`, clamped to the catalog bounds.
    ///
    /// Out-of-catalog input is not rejected; the catalog simply returns nothing.
    pub fn around(closest: i64) -> Self {
        let max = if closest < MAX_CATALOG_DIFFICULTY - WINDOW_HALF_WIDTH {
            closest + WINDOW_HALF_WIDTH
        } else {
            MAX_CATALOG_DIFFICULTY
        };

        let min = if closest > WINDOW_HALF_WIDTH {
            closest - WINDOW_HALF_WIDTH
        } else {
            MIN_CATALOG_DIFFICULTY
        };

        Self { min, max }
    }
}
