use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Preset chart selection picked by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    All,
    Business,
    Geographic,
    Digital,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::All,
        ViewMode::Business,
        ViewMode::Geographic,
        ViewMode::Digital,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Business => "business",
            ViewMode::Geographic => "geographic",
            ViewMode::Digital => "digital",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ViewMode::All),
            "business" => Ok(ViewMode::Business),
            "geographic" => Ok(ViewMode::Geographic),
            "digital" => Ok(ViewMode::Digital),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

/// Individually toggleable chart sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSection {
    BusinessModel,
    Geographic,
    DigitalPresence,
    GlobalReach,
}

impl ChartSection {
    pub const ALL: [ChartSection; 4] = [
        ChartSection::BusinessModel,
        ChartSection::Geographic,
        ChartSection::DigitalPresence,
        ChartSection::GlobalReach,
    ];
}

impl FromStr for ChartSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "business_model" | "business" => Ok(ChartSection::BusinessModel),
            "geographic" => Ok(ChartSection::Geographic),
            "digital_presence" | "digital" => Ok(ChartSection::DigitalPresence),
            "global_reach" | "global" => Ok(ChartSection::GlobalReach),
            other => Err(format!("unknown chart section '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub business_model: bool,
    pub geographic: bool,
    pub digital_presence: bool,
    pub global_reach: bool,
}

impl Visibility {
    pub fn is_visible(&self, section: ChartSection) -> bool {
        match section {
            ChartSection::BusinessModel => self.business_model,
            ChartSection::Geographic => self.geographic,
            ChartSection::DigitalPresence => self.digital_presence,
            ChartSection::GlobalReach => self.global_reach,
        }
    }

    fn flag_mut(&mut self, section: ChartSection) -> &mut bool {
        match section {
            ChartSection::BusinessModel => &mut self.business_model,
            ChartSection::Geographic => &mut self.geographic,
            ChartSection::DigitalPresence => &mut self.digital_presence,
            ChartSection::GlobalReach => &mut self.global_reach,
        }
    }
}

/// Section visibility for a view mode. The business view also keeps the
/// website-by-type chart, and global reach travels with the geographic view.
pub fn visibility_for(mode: ViewMode) -> Visibility {
    match mode {
        ViewMode::All => Visibility {
            business_model: true,
            geographic: true,
            digital_presence: true,
            global_reach: true,
        },
        ViewMode::Business => Visibility {
            business_model: true,
            geographic: false,
            digital_presence: true,
            global_reach: false,
        },
        ViewMode::Geographic => Visibility {
            business_model: false,
            geographic: true,
            digital_presence: false,
            global_reach: true,
        },
        ViewMode::Digital => Visibility {
            business_model: false,
            geographic: false,
            digital_presence: true,
            global_reach: false,
        },
    }
}

/// Display state owned by the presentation layer and passed into the chart
/// view. Selecting a mode resets section visibility; toggling a section
/// afterwards leaves the recorded mode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub mode: ViewMode,
    pub visibility: Visibility,
    pub show_insights: bool,
    pub show_suggestions: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            mode: ViewMode::All,
            visibility: visibility_for(ViewMode::All),
            show_insights: true,
            show_suggestions: true,
        }
    }
}

impl DisplayState {
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.visibility = visibility_for(mode);
    }

    pub fn toggle(&mut self, section: ChartSection) {
        let flag = self.visibility.flag_mut(section);
        *flag = !*flag;
    }

    pub fn toggle_insights(&mut self) {
        self.show_insights = !self.show_insights;
    }

    pub fn toggle_suggestions(&mut self) {
        self.show_suggestions = !self.show_suggestions;
    }
}
