//! 덕트 재질별 절대 조도 테이블.
//! 값은 참고용 근사치이며 실제 설계 시 제조사 자료로 검증해야 한다.

/// 이름을 찾지 못했을 때 사용하는 조도 (아연도강판 값) [mm]
pub const DEFAULT_ROUGHNESS_MM: f64 = 0.0015;

/// 기본 재질 이름.
pub const DEFAULT_MATERIAL: &str = "Galvanized Steel";

/// 기본 제공 재질과 절대 조도 [mm].
const SEEDED_MATERIALS: &[(&str, f64)] = &[
    ("Galvanized Steel", 0.0015),
    ("Aluminum", 0.0015),
    ("Stainless Steel", 0.0015),
    ("PVC", 0.0015),
    ("Fiberglass", 0.003),
];

/// 조도 테이블의 한 항목.
#[derive(Debug, Clone, PartialEq)]
pub struct RoughnessEntry {
    pub name: String,
    pub roughness_mm: f64,
}

/// 재질 이름 → 절대 조도 [mm] 매핑.
///
/// 생성 시점에만 항목을 추가할 수 있고, 이후에는 읽기 전용으로 공유한다.
#[derive(Debug, Clone, PartialEq)]
pub struct RoughnessTable {
    entries: Vec<RoughnessEntry>,
}

impl Default for RoughnessTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RoughnessTable {
    /// 기본 5개 재질로 초기화한 테이블.
    pub fn standard() -> Self {
        Self {
            entries: SEEDED_MATERIALS
                .iter()
                .map(|&(name, roughness_mm)| RoughnessEntry {
                    name: name.to_string(),
                    roughness_mm,
                })
                .collect(),
        }
    }

    /// 재질을 추가한다. 같은 이름(대소문자 무시)이 있으면 값을 덮어쓴다.
    pub fn with_material(mut self, name: impl Into<String>, roughness_mm: f64) -> Self {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(entry) => entry.roughness_mm = roughness_mm,
            None => self.entries.push(RoughnessEntry {
                name: name.trim().to_string(),
                roughness_mm,
            }),
        }
        self
    }

    /// 추가 재질 목록을 한 번에 반영한다.
    pub fn extended<'a, I>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        extra
            .into_iter()
            .fold(self, |table, (name, r)| table.with_material(name.as_str(), *r))
    }

    pub fn entries(&self) -> &[RoughnessEntry] {
        &self.entries
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.roughness_mm)
    }

    /// 조도를 반환한다. 등록되지 않은 이름이면 아연도강판 값으로 대체한다.
    pub fn roughness_mm(&self, name: &str) -> f64 {
        match self.lookup(name) {
            Some(r) => r,
            None => {
                tracing::warn!(
                    material = name,
                    fallback_mm = DEFAULT_ROUGHNESS_MM,
                    "unknown duct material, using default roughness"
                );
                DEFAULT_ROUGHNESS_MM
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn standard_table_has_five_seeded_entries() {
        let table = RoughnessTable::standard();
        assert_eq!(table.entries().len(), 5);
        assert_eq!(table.lookup("Fiberglass"), Some(0.003));
        assert_eq!(table.lookup("pvc"), Some(0.0015));
    }

    #[test]
    fn unknown_material_falls_back_to_galvanized() {
        let table = RoughnessTable::standard();
        assert_eq!(table.lookup("Copper"), None);
        assert_eq!(table.roughness_mm("Copper"), DEFAULT_ROUGHNESS_MM);
        assert_eq!(
            table.roughness_mm("Copper"),
            table.roughness_mm(DEFAULT_MATERIAL)
        );
    }

    #[test]
    fn extension_overrides_and_appends() {
        let mut extra = BTreeMap::new();
        extra.insert("Flexible Duct".to_string(), 0.9);
        extra.insert("fiberglass".to_string(), 0.005);
        let table = RoughnessTable::standard().extended(&extra);
        assert_eq!(table.entries().len(), 6);
        assert_eq!(table.lookup("Fiberglass"), Some(0.005));
        assert_eq!(table.lookup("flexible duct"), Some(0.9));
    }

    #[test]
    fn lookup_trims_and_ignores_case() {
        let table = RoughnessTable::standard();
        assert_eq!(table.lookup("  stainless STEEL "), Some(0.0015));
        assert_eq!(table.entries()[0].name, DEFAULT_MATERIAL);
    }
}
