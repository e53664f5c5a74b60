use std::fmt;

/// The paired comparisons models shipped in the model directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    /// Plain Bradley-Terry on home wins.
    Btl,
    /// Bradley-Terry with a home advantage term.
    Home,
    /// Ordered logistic on the run margin category.
    Mag,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] = [ModelVariant::Btl, ModelVariant::Home, ModelVariant::Mag];

    /// Short name used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            ModelVariant::Btl => "btl",
            ModelVariant::Home => "home",
            ModelVariant::Mag => "mag",
        }
    }

    pub fn stan_file(self) -> &'static str {
        match self {
            ModelVariant::Btl => "bt.stan",
            ModelVariant::Home => "bt_home.stan",
            ModelVariant::Mag => "bt_mag.stan",
        }
    }

    /// Whether `y` is the margin category rather than the home win flag.
    pub fn uses_margin(self) -> bool {
        matches!(self, ModelVariant::Mag)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
