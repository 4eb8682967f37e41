//! Document parser combining the per-field cascades.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::comprobante::{doc_code, Comprobante};
use crate::pdf::DocumentText;
use crate::reconcile::{reconcile, ReconcileMode};

use super::activity;
use super::rules;
use super::Result;

/// Parser that runs every field cascade over acquired page text.
pub struct ComprobanteParser {
    mode: ReconcileMode,
    today: NaiveDate,
}

impl ComprobanteParser {
    /// Create a parser with the default reconciliation mode.
    pub fn new() -> Self {
        Self {
            mode: ReconcileMode::default(),
            today: Local::now().date_naive(),
        }
    }

    /// Set the cross-page reconciliation mode.
    pub fn with_mode(mut self, mode: ReconcileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the reference date used by the date/period fallbacks.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Extract every field from one text blob.
    ///
    /// Fails only when no issuer CUIT is present at all; any other missing
    /// field leaves its slot empty so callers can report exactly what is
    /// absent.
    pub fn parse_text(&self, text: &str) -> Result<Comprobante> {
        let issuer_cuit = rules::extract_issuer_cuit(text).ok_or(ExtractionError::MissingIssuer)?;

        let kind = rules::extract_kind(text);
        let letter = rules::extract_letter(text, kind);
        let code = kind
            .zip(letter)
            .map(|(k, l)| doc_code(k, l).to_string());

        let (sales_point, doc_number) = match rules::extract_pv_nro(text) {
            Some((pv, nro)) => (Some(pv), Some(nro)),
            None => (None, None),
        };

        let issue_date = rules::extract_issue_date(text, self.today);
        let (cae, emission) = match rules::extract_cae(text) {
            Some((cae, emission)) => (Some(cae), Some(emission)),
            None => (None, None),
        };
        let amount = rules::extract_amount(text);
        let period = rules::extract_period(text, self.today);

        let (activity_code, dependency) = activity::classify(text);
        let quantity = activity::default_quantity(activity_code);

        let fields = Comprobante {
            issuer_cuit,
            kind,
            letter,
            doc_code: code,
            sales_point,
            doc_number,
            issue_date,
            cae,
            emission,
            amount,
            period,
            activity: activity_code.to_string(),
            dependency,
            quantity: quantity.to_string(),
        };

        debug!(
            issuer = %fields.issuer_cuit,
            complete = fields.is_complete(),
            activity = %fields.activity,
            "parsed document text"
        );

        Ok(fields)
    }

    /// Extract from the acquired pages under the configured reconciliation
    /// mode.
    pub fn parse_document(&self, document: &DocumentText) -> Result<Comprobante> {
        let combined = document.combined();

        match self.mode {
            ReconcileMode::SinglePass => self.parse_text(&combined),
            ReconcileMode::CrossCheck => {
                let first = self.page_identity(document, 0);
                let second = self.page_identity(document, 1);
                let identity = reconcile(first, second)?;

                // Full-field recovery still uses the concatenated text; only
                // the identity is pinned to the reconciled value.
                let mut fields = self.parse_text(&combined)?;
                fields.apply_identity(identity);
                Ok(fields)
            }
        }
    }

    fn page_identity(
        &self,
        document: &DocumentText,
        index: usize,
    ) -> Option<crate::reconcile::Identity> {
        let page = document.page(index)?;
        self.parse_text(&page.text).ok().and_then(|c| c.identity())
    }
}

impl Default for ComprobanteParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comprobante::{Dependency, DocKind, Emission, Letter};
    use crate::pdf::{PageText, TextOrigin};
    use pretty_assertions::assert_eq;

    const FACTURA_C: &str = "\
ORIGINAL
C FACTURA
COD. 011
Punto de Venta: 00004    Comp. Nro: 00003575
Fecha de Emisión: 05/03/2025
CUIT: 30-12345678-9
Ingresos Brutos: Exento
Período Facturado Desde: 01/02/2025 Hasta: 28/02/2025
Sr/a: PEREZ, JUAN   CUIL 20-34567890-1
Honorarios profesionales por 4 sesiones de psicología
Importe Total: $ 48.000,00
CAE N°: 75123456789012
Fecha de Vto. de CAE: 15/03/2025";

    fn parser() -> ComprobanteParser {
        ComprobanteParser::new()
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn page(text: &str) -> PageText {
        PageText {
            text: text.to_string(),
            origin: TextOrigin::Embedded,
        }
    }

    #[test]
    fn test_parse_full_factura() {
        let fields = parser().parse_text(FACTURA_C).unwrap();

        assert_eq!(fields.issuer_cuit, "30123456789");
        assert_eq!(fields.kind, Some(DocKind::Factura));
        assert_eq!(fields.letter, Some(Letter::C));
        assert_eq!(fields.doc_code.as_deref(), Some("05"));
        assert_eq!(fields.sales_point.as_deref(), Some("4"));
        assert_eq!(fields.doc_number.as_deref(), Some("3575"));
        assert_eq!(fields.issue_date, "05/03/2025");
        assert_eq!(fields.cae.as_deref(), Some("75123456789012"));
        assert_eq!(fields.emission, Some(Emission::Electronic));
        assert_eq!(fields.amount.as_deref(), Some("4800000"));
        assert_eq!(fields.period, "022025");
        assert_eq!(fields.activity, "091");
        assert_eq!(fields.dependency, Dependency::No);
        assert_eq!(fields.quantity, "000004");
        assert!(fields.is_complete());
    }

    #[test]
    fn test_parse_without_cuit_fails() {
        let result = parser().parse_text("FACTURA C sin identificación fiscal");
        assert_eq!(result, Err(ExtractionError::MissingIssuer));
    }

    #[test]
    fn test_single_pass_uses_both_pages() {
        let document = DocumentText::new(vec![
            page("CUIT: 30-12345678-9\nC FACTURA\nPunto de Venta: 00004    Comp. Nro: 00001234"),
            page("Fecha de Emisión: 05/03/2025\nImporte Total: 1500,75"),
        ]);
        let fields = parser().parse_document(&document).unwrap();
        assert_eq!(fields.issue_date, "05/03/2025");
        assert_eq!(fields.amount.as_deref(), Some("150075"));
        assert!(fields.is_complete());
    }

    #[test]
    fn test_cross_check_agreeing_pages() {
        let text = "CUIT: 30-12345678-9\nC FACTURA\nPunto de Venta: 00004    Comp. Nro: 00001234";
        let document = DocumentText::new(vec![page(text), page(text)]);
        let fields = parser()
            .with_mode(ReconcileMode::CrossCheck)
            .parse_document(&document)
            .unwrap();
        assert_eq!(fields.sales_point.as_deref(), Some("4"));
        assert_eq!(fields.doc_number.as_deref(), Some("1234"));
    }

    #[test]
    fn test_cross_check_disagreeing_pages() {
        let document = DocumentText::new(vec![
            page("CUIT: 30-12345678-9\nC FACTURA\nPunto de Venta: 00004    Comp. Nro: 00001234"),
            page("CUIT: 30-12345678-9\nC FACTURA\nPunto de Venta: 00004    Comp. Nro: 00009999"),
        ]);
        let result = parser()
            .with_mode(ReconcileMode::CrossCheck)
            .parse_document(&document);
        assert!(matches!(result, Err(ExtractionError::PageMismatch { .. })));
    }

    #[test]
    fn test_cross_check_single_identifying_page() {
        let document = DocumentText::new(vec![
            page("CUIT: 30-12345678-9\nC FACTURA\nPunto de Venta: 00004    Comp. Nro: 00001234"),
            page("detalle de prestaciones sin encabezado"),
        ]);
        let fields = parser()
            .with_mode(ReconcileMode::CrossCheck)
            .parse_document(&document)
            .unwrap();
        assert_eq!(fields.doc_number.as_deref(), Some("1234"));
    }

    #[test]
    fn test_cross_check_no_identifying_pages() {
        let document = DocumentText::new(vec![
            page("texto sin datos"),
            page("más texto sin datos"),
        ]);
        let result = parser()
            .with_mode(ReconcileMode::CrossCheck)
            .parse_document(&document);
        assert_eq!(result, Err(ExtractionError::NoIdentity));
    }
}
