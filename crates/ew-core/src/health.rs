//! Binary health state carried by every walker.
//!
//! There is deliberately no removed/dead variant: walkers only ever flip
//! between `Susceptible` and `Infected`.

/// Health of a single walker.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Health {
    #[default]
    Susceptible,
    Infected,
}

impl Health {
    #[inline]
    pub fn is_infected(self) -> bool {
        matches!(self, Health::Infected)
    }

    /// The state the walker moves to on its next epidemic transition.
    #[inline]
    pub fn flipped(self) -> Health {
        match self {
            Health::Susceptible => Health::Infected,
            Health::Infected    => Health::Susceptible,
        }
    }

    /// Single-letter label, as used in compartment plots.
    pub fn as_str(self) -> &'static str {
        match self {
            Health::Susceptible => "S",
            Health::Infected    => "I",
        }
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
