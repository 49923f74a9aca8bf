use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::contains_keyword;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Fail,
    #[default]
    Unknown,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Fail => "FAIL",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✅",
            Self::Warning => "⚠️",
            Self::Fail => "❌",
            Self::Unknown => "ℹ️",
        }
    }

    /// CSS modifier used for cards and banners.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Fail => "fail",
            Self::Unknown => "info",
        }
    }

    pub fn banner_text(self) -> &'static str {
        match self {
            Self::Ok => "VALIDACIÓN EXITOSA",
            Self::Warning => "REVISAR RESULTADOS",
            Self::Fail => "VALIDACIÓN FALLIDA",
            Self::Unknown => "ESTADO DESCONOCIDO",
        }
    }

    pub fn banner_description(self) -> &'static str {
        match self {
            Self::Ok => {
                "Todos los procesos de validación han sido completados exitosamente. El equipo está correctamente alineado y listo para uso en producción."
            }
            Self::Warning => {
                "Algunos resultados requieren revisión. Consultar las secciones detalladas para más información."
            }
            Self::Fail => {
                "La validación ha fallado. El equipo requiere ajustes antes de ser utilizado en producción."
            }
            Self::Unknown => "Estado de validación indeterminado. Revisar informes individuales.",
        }
    }

    fn severity(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Ok => 1,
            Self::Warning => 2,
            Self::Fail => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a result cell that encodes status either as a symbol or as an
/// uppercase keyword. Symbols win over keywords.
pub fn status_from_cell(cell: &str) -> Status {
    const SYMBOLS: [(&str, Status); 3] = [
        ("✅", Status::Ok),
        ("⚠", Status::Warning),
        ("❌", Status::Fail),
    ];
    const KEYWORDS: [(&str, Status); 3] = [
        ("OK", Status::Ok),
        ("WARNING", Status::Warning),
        ("FAIL", Status::Fail),
    ];

    if let Some((_, status)) = SYMBOLS.iter().find(|(symbol, _)| cell.contains(symbol)) {
        return *status;
    }

    let upper = cell.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|(_, status)| *status)
        .unwrap_or(Status::Unknown)
}

/// Quality grade of the post-adjustment verification, derived from RMS and
/// maximum difference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    Excellent,
    Good,
    Acceptable,
    NeedsReview,
    Unknown,
}

impl VerificationState {
    pub fn from_metrics(rms: f64, max_diff: f64) -> Self {
        if rms < 0.005 && max_diff < 0.01 {
            Self::Excellent
        } else if rms < 0.01 && max_diff < 0.015 {
            Self::Good
        } else if rms < 0.015 && max_diff < 0.03 {
            Self::Acceptable
        } else {
            Self::NeedsReview
        }
    }

    /// Same as [`from_metrics`](Self::from_metrics) for raw cell text;
    /// unparsable input yields `Unknown`.
    pub fn from_raw(rms: Option<&str>, max_diff: Option<&str>) -> Self {
        let rms = rms.and_then(crate::dom::parse_decimal);
        let max_diff = max_diff.and_then(crate::dom::parse_decimal);
        match (rms, max_diff) {
            (Some(rms), Some(max_diff)) => Self::from_metrics(rms, max_diff),
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELENTE",
            Self::Good => "BUENO",
            Self::Acceptable => "ACEPTABLE",
            Self::NeedsReview => "REQUIERE REVISIÓN",
            Self::Unknown => "UNKNOWN",
        }
    }

    fn rank(self) -> Option<u8> {
        match self {
            Self::Excellent => Some(3),
            Self::Good => Some(2),
            Self::Acceptable => Some(1),
            Self::NeedsReview => Some(0),
            Self::Unknown => None,
        }
    }

    /// True when `self` is at least as good a grade as `other`.
    pub fn at_least(self, other: Self) -> bool {
        match (self.rank(), other.rank()) {
            (Some(lhs), Some(rhs)) => lhs >= rhs,
            _ => false,
        }
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const CONCLUSION_OK_KEYWORDS: [&str; 4] = ["exitosa", "successful", "correctamente", "correctly"];
pub const CONCLUSION_WARNING_KEYWORDS: [&str; 3] = ["warning", "revisar", "review"];

/// Pass/fail verdict of a baseline adjustment, read from its conclusion text.
///
/// This is a free-text heuristic on wording produced upstream; a conclusion
/// that matches neither keyword set is treated as a failure.
pub fn baseline_verdict(conclusion: Option<&str>) -> Status {
    let Some(conclusion) = conclusion.map(str::trim).filter(|text| !text.is_empty()) else {
        return Status::Unknown;
    };

    if contains_keyword(conclusion, &CONCLUSION_OK_KEYWORDS) {
        Status::Ok
    } else if contains_keyword(conclusion, &CONCLUSION_WARNING_KEYWORDS) {
        Status::Warning
    } else {
        Status::Fail
    }
}

/// Verdict of an optical validation from its failed/review counts. Both
/// counts must be known; one missing count makes the verdict UNKNOWN.
pub fn validation_verdict(failed: Option<u32>, review: Option<u32>) -> Status {
    let (Some(failed), Some(review)) = (failed, review) else {
        return Status::Unknown;
    };
    if failed > 0 {
        Status::Fail
    } else if review > 0 {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// Predictions carry no acceptance criteria yet; any extracted product counts as OK.
pub fn predictions_verdict(product_count: usize) -> Status {
    if product_count > 0 {
        Status::Ok
    } else {
        Status::Unknown
    }
}

/// Combines per-report verdicts: FAIL over WARNING over OK; nothing known is UNKNOWN.
pub fn reconcile<I>(verdicts: I) -> Status
where
    I: IntoIterator<Item = Status>,
{
    verdicts
        .into_iter()
        .max_by_key(|status| status.severity())
        .unwrap_or(Status::Unknown)
}
