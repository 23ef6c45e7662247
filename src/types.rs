use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifies one display output.
///
/// The primary display is a sentinel rather than a name: the native calls
/// take a null device name to mean "the primary display".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Device {
    Primary,
    Named(String),
}

impl Device {
    /// The device name to hand to the OS, `None` for the primary display.
    pub fn name(&self) -> Option<&str> {
        match self {
            Device::Primary => None,
            Device::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Primary => write!(f, "primary display"),
            Device::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Contains the resolution of a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same resolution with width and height exchanged
    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors that occur while parsing a resolution from a string
#[derive(Error, Debug)]
pub enum ParseResolutionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First integer missing")]
    FirstPart,
    #[error("Second integer missing. Expected format: <width>x<height>")]
    SecondPart,
    #[error("Expected exactly two integers. Expected format: <width>x<height>")]
    TooManyParts,
    #[error("Width and height must both be positive")]
    NotPositive,
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('x');
        let width: u32 = parts
            .next()
            .ok_or(ParseResolutionError::FirstPart)?
            .parse()?;
        let height: u32 = parts
            .next()
            .ok_or(ParseResolutionError::SecondPart)?
            .parse()?;
        if parts.next().is_some() {
            return Err(ParseResolutionError::TooManyParts);
        }
        if width == 0 || height == 0 {
            return Err(ParseResolutionError::NotPositive);
        }
        Ok(Self::new(width, height))
    }
}

/// Refresh rate in Hz; zero means the driver default
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Frequency(pub u32);

impl Frequency {
    pub fn new(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum ParseFrequencyError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Frequency(s.parse::<u32>()?))
    }
}

/// Display orientation (rotation)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Landscape,
    ReverseLandscape,
    Portrait,
    ReversePortrait,
}

impl Orientation {
    /// The driver's rotation numbering (0 = default, 1 = 90 degrees,
    /// 2 = 180 degrees, 3 = 270 degrees). Not monotonic with declaration
    /// order; it must match the rotation the OS performs, not the enum.
    pub fn rotation_code(self) -> u32 {
        match self {
            Orientation::Landscape => 0,
            Orientation::ReversePortrait => 1,
            Orientation::ReverseLandscape => 2,
            Orientation::Portrait => 3,
        }
    }

    /// Inverse of [`rotation_code`](Self::rotation_code)
    pub fn from_rotation_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Orientation::Landscape),
            1 => Some(Orientation::ReversePortrait),
            2 => Some(Orientation::ReverseLandscape),
            3 => Some(Orientation::Portrait),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::ReverseLandscape => write!(f, "reverse_landscape"),
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::ReversePortrait => write!(f, "reverse_portrait"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseOrientationError {
    #[error("Unknown orientation: {0}")]
    UnknownOrientation(String),
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "landscape" => Ok(Orientation::Landscape),
            "reverselandscape" | "reverse_landscape" | "reverse-landscape" => {
                Ok(Orientation::ReverseLandscape)
            }
            "portrait" => Ok(Orientation::Portrait),
            "reverseportrait" | "reverse_portrait" | "reverse-portrait" => {
                Ok(Orientation::ReversePortrait)
            }
            _ => Err(ParseOrientationError::UnknownOrientation(s.to_string())),
        }
    }
}

/// A mode attribute that can be explicitly requested to change
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Resolution,
    Orientation,
    RefreshRate,
}

impl Field {
    const ALL: [Field; 3] = [Field::Resolution, Field::Orientation, Field::RefreshRate];

    fn bit(self) -> u8 {
        match self {
            Field::Resolution => 0b001,
            Field::Orientation => 0b010,
            Field::RefreshRate => 0b100,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Resolution => write!(f, "resolution"),
            Field::Orientation => write!(f, "orientation"),
            Field::RefreshRate => write!(f, "refresh_rate"),
        }
    }
}

/// The set of fields a mode change asks the driver to touch.
///
/// Fields not in the set are left unspecified in the native call so the
/// driver keeps their current values; marking only what was requested is
/// what keeps an apply from clobbering unrelated attributes.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b111)
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the fields in the set
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|field| self.contains(*field))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = Self::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for (i, field) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldSet({})", self)
    }
}

/// Result taxonomy of the native settings-change call.
///
/// The numeric codes are fixed by the OS (`DISP_CHANGE_*`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DispChange {
    Successful,
    Restart,
    Failed,
    BadMode,
    NotUpdated,
    BadFlags,
    BadParam,
    BadDualView,
}

impl DispChange {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => DispChange::Successful,
            1 => DispChange::Restart,
            -1 => DispChange::Failed,
            -2 => DispChange::BadMode,
            -3 => DispChange::NotUpdated,
            -4 => DispChange::BadFlags,
            -5 => DispChange::BadParam,
            -6 => DispChange::BadDualView,
            _ => DispChange::Failed,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            DispChange::Successful => 0,
            DispChange::Restart => 1,
            DispChange::Failed => -1,
            DispChange::BadMode => -2,
            DispChange::NotUpdated => -3,
            DispChange::BadFlags => -4,
            DispChange::BadParam => -5,
            DispChange::BadDualView => -6,
        }
    }

    /// `Restart` still means the change was applied; everything below
    /// `Restart` is a hard failure.
    pub fn is_success(self) -> bool {
        matches!(self, DispChange::Successful | DispChange::Restart)
    }
}

impl fmt::Display for DispChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DispChange::Successful => "Successful",
            DispChange::Restart => "Restart",
            DispChange::Failed => "Failed",
            DispChange::BadMode => "BadMode",
            DispChange::NotUpdated => "NotUpdated",
            DispChange::BadFlags => "BadFlags",
            DispChange::BadParam => "BadParam",
            DispChange::BadDualView => "BadDualView",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
