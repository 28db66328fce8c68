// ABOUTME: Length units used by the presentation format
// ABOUTME: Converts centimeters and points into English Metric Units (EMU)

/// EMUs per centimeter.
pub const EMU_PER_CM: f64 = 360_000.0;

/// EMUs per typographic point.
pub const EMU_PER_PT: f64 = 12_700.0;

/// A length in English Metric Units, the native unit of DrawingML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Emu(pub i64);

impl Emu {
    /// Truncates toward zero, matching how office libraries convert lengths.
    pub fn from_cm(cm: f64) -> Self {
        Emu((cm * EMU_PER_CM) as i64)
    }

    pub fn from_pt(pt: f64) -> Self {
        Emu((pt * EMU_PER_PT) as i64)
    }

    pub fn to_cm(self) -> f64 {
        self.0 as f64 / EMU_PER_CM
    }

    pub fn to_pt(self) -> f64 {
        self.0 as f64 / EMU_PER_PT
    }
}

impl std::fmt::Display for Emu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Font sizes are stored in hundredths of a point (`sz` attribute).
pub fn pt_to_centipoints(pt: f64) -> i64 {
    (pt * 100.0) as i64
}

pub fn centipoints_to_pt(centipoints: i64) -> f64 {
    centipoints as f64 / 100.0
}
