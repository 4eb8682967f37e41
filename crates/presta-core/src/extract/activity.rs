//! Service-activity classification from free invoice text.
//!
//! A case-insensitive keyword scan over the whole document; the first
//! matching rule wins. Accented and accentless spellings are both listed
//! because OCR output loses diacritics unpredictably.

use crate::models::comprobante::Dependency;

use super::rules::patterns::KM_WORD;

/// Terms that mark a dependent-care beneficiary.
const DEPENDENCY_TERMS: [&str; 3] = ["dependencia", "discapacidad", "discapac"];

/// Professional-therapy disciplines billed under activity 091.
const PROFESSIONAL_TERMS: [&str; 17] = [
    "psicología",
    "psicologia",
    "psicólogo",
    "psicologo",
    "musicoterapia",
    "musicoterapeuta",
    "kinesiología",
    "kinesiologia",
    "kinesiólogo",
    "kinesiologo",
    "fonoaudiología",
    "fonoaudiologia",
    "fonoaudiólogo",
    "fonoaudiologo",
    "psicopedagogía",
    "psicopedagogia",
    "psicopedagogo",
];

/// School-integration-support services billed under activity 089.
const SCHOOL_SUPPORT_TERMS: [&str; 6] = [
    "módulo de apoyo",
    "modulo de apoyo",
    "apoyo a la integración",
    "apoyo a la integracion",
    "maestra integradora",
    "maestro integrador",
];

/// Generic therapy wording billed under activity 090.
const THERAPY_TERMS: [&str; 3] = ["honorarios profesionales", "sesiones", "terapia"];

/// Classify the service activity and the dependency flag.
pub fn classify(text: &str) -> (&'static str, Dependency) {
    let lower = text.to_lowercase();

    // Transport is the only activity that keeps the dependency terms
    // meaningful; everything matched by name below is non-dependent care.
    if lower.contains("transporte") || lower.contains("traslado") || KM_WORD.is_match(&lower) {
        return ("096", dependency_flag(&lower));
    }

    if PROFESSIONAL_TERMS.iter().any(|t| lower.contains(t)) {
        return ("091", Dependency::No);
    }

    if lower.contains("estimulación temprana") || lower.contains("estimulacion temprana") {
        return ("085", Dependency::No);
    }

    if SCHOOL_SUPPORT_TERMS.iter().any(|t| lower.contains(t)) {
        return ("089", Dependency::No);
    }

    if THERAPY_TERMS.iter().any(|t| lower.contains(t)) {
        return ("090", Dependency::No);
    }

    ("090", dependency_flag(&lower))
}

fn dependency_flag(lower: &str) -> Dependency {
    if DEPENDENCY_TERMS.iter().any(|t| lower.contains(t)) {
        Dependency::Yes
    } else {
        Dependency::No
    }
}

/// Default quantity by activity code, as a six-digit string.
pub fn default_quantity(activity: &str) -> &'static str {
    match activity {
        "096" => "001500",
        "090" | "091" => "000004",
        _ => "000001",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transport_with_dependency() {
        let (activity, dep) = classify("Transporte de paciente con discapacidad, 120 km");
        assert_eq!(activity, "096");
        assert_eq!(dep, Dependency::Yes);
    }

    #[test]
    fn test_transport_without_dependency() {
        let (activity, dep) = classify("TRASLADO a centro de rehabilitación");
        assert_eq!(activity, "096");
        assert_eq!(dep, Dependency::No);
    }

    #[test]
    fn test_km_word_is_transport() {
        let (activity, _) = classify("Recorrido total 85 km mensuales");
        assert_eq!(activity, "096");
    }

    #[test]
    fn test_professional_terms() {
        assert_eq!(classify("Sesión de psicología clínica").0, "091");
        assert_eq!(classify("kinesiologia motora").0, "091");
        assert_eq!(classify("Atención fonoaudiológica por fonoaudiologo").0, "091");
    }

    #[test]
    fn test_early_stimulation() {
        assert_eq!(classify("Estimulación Temprana - módulo completo").0, "085");
        assert_eq!(classify("estimulacion temprana").0, "085");
    }

    #[test]
    fn test_school_support() {
        assert_eq!(classify("Módulo de apoyo a la integración escolar").0, "089");
        assert_eq!(classify("maestra integradora turno mañana").0, "089");
    }

    #[test]
    fn test_generic_therapy() {
        let (activity, dep) = classify("Facturo 4 sesiones del mes");
        assert_eq!(activity, "090");
        assert_eq!(dep, Dependency::No);
    }

    #[test]
    fn test_default_with_dependency_terms() {
        let (activity, dep) = classify("Prestación por dependencia del afiliado");
        assert_eq!(activity, "090");
        assert_eq!(dep, Dependency::Yes);
    }

    #[test]
    fn test_default_quantity() {
        assert_eq!(default_quantity("096"), "001500");
        assert_eq!(default_quantity("090"), "000004");
        assert_eq!(default_quantity("091"), "000004");
        assert_eq!(default_quantity("085"), "000001");
        assert_eq!(default_quantity("089"), "000001");
    }
}
