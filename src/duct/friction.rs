/// 층류 상한 레이놀즈수
pub const LAMINAR_LIMIT_RE: f64 = 2300.0;
/// 난류 하한 레이놀즈수
pub const TURBULENT_LIMIT_RE: f64 = 4000.0;

/// 유동 영역 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowType {
    /// 레이놀즈수로 유동 영역을 판정한다. 경계값(2300, 4000)은 아래 영역에 속한다.
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds > TURBULENT_LIMIT_RE {
            FlowType::Turbulent
        } else if reynolds > LAMINAR_LIMIT_RE {
            FlowType::Transitional
        } else {
            FlowType::Laminar
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowType::Laminar => "Laminar",
            FlowType::Transitional => "Transitional",
            FlowType::Turbulent => "Turbulent",
        }
    }
}

impl std::fmt::Display for FlowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 층류 마찰계수 f = 64 / Re
pub fn laminar_friction_factor(reynolds: f64) -> f64 {
    64.0 / reynolds
}

/// Haaland 근사식으로 난류 Darcy 마찰계수를 구한다.
///
/// 1/√f = -1.8 · log10[ (ε/D / 3.7)^1.11 + 6.9 / Re ]
pub fn haaland_friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    let log_term = (relative_roughness / 3.7).powf(1.11) + 6.9 / reynolds;
    let inv_sqrt_f = -1.8 * log_term.log10();
    1.0 / inv_sqrt_f.powi(2)
}

/// Darcy 마찰계수를 계산한다.
///
/// - Re < 2300: 층류식
/// - 2300 ≤ Re < 4000: 층류값과 Haaland 값을 x = (Re-2300)/1700 로 선형 보간
/// - Re ≥ 4000: Haaland
///
/// 입력을 검증하지 않으므로 Re ≤ 0 이나 직경 0 은 NaN/무한대로 전파된다.
pub fn friction_factor(reynolds: f64, roughness_mm: f64, diameter_mm: f64) -> f64 {
    let relative_roughness = roughness_mm / diameter_mm;
    if reynolds < LAMINAR_LIMIT_RE {
        return laminar_friction_factor(reynolds);
    }
    let turbulent = haaland_friction_factor(reynolds, relative_roughness);
    if reynolds < TURBULENT_LIMIT_RE {
        let x = (reynolds - LAMINAR_LIMIT_RE) / (TURBULENT_LIMIT_RE - LAMINAR_LIMIT_RE);
        let laminar = laminar_friction_factor(reynolds);
        return laminar * (1.0 - x) + turbulent * x;
    }
    turbulent
}
