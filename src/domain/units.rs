/// Unit system for reported heights. Anything other than `meters` falls back
/// to feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Feet,
    Meters,
}

impl Units {
    pub fn parse(s: &str) -> Units {
        match s.trim() {
            "meters" => Units::Meters,
            _ => Units::Feet,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Units::Feet => "feet",
            Units::Meters => "meters",
        }
    }

    /// Converts a height in feet, truncating toward zero.
    pub fn convert_feet(&self, feet: u64) -> u64 {
        match self {
            Units::Feet => feet,
            Units::Meters => (feet as f64 / 3.28) as u64,
        }
    }
}
