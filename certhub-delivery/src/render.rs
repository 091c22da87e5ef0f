use certhub_error::{delivery::DeliveryError, DeliveryResult};
use certhub_models::entities::prelude::CertificateModel;
use printpdf::{BuiltinFont, Mm, PdfDocument};

/// Renders a certificate row into a distributable artifact.
pub trait CertificateRenderer: Send + Sync {
    fn render(&self, certificate: &CertificateModel) -> DeliveryResult<Vec<u8>>;
}

/// Landscape A4 PDF with the recipient name centered, built entirely from
/// the denormalized fields on the certificate row.
pub struct PdfCertificateRenderer;

impl CertificateRenderer for PdfCertificateRenderer {
    fn render(&self, certificate: &CertificateModel) -> DeliveryResult<Vec<u8>> {
        let (doc, page, layer) =
            PdfDocument::new("Certificate of Participation", Mm(297.0), Mm(210.0), "Layer 1");

        let serif = doc
            .add_builtin_font(BuiltinFont::TimesRoman)
            .map_err(|e| DeliveryError::Render(e.to_string()))?;
        let serif_bold = doc
            .add_builtin_font(BuiltinFont::TimesBold)
            .map_err(|e| DeliveryError::Render(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);

        layer.use_text(
            "CERTIFICATE OF PARTICIPATION",
            28.0,
            Mm(78.0),
            Mm(170.0),
            &serif_bold,
        );
        layer.use_text("This certifies that", 14.0, Mm(123.0), Mm(145.0), &serif);
        layer.use_text(
            certificate.recipient_name.as_str(),
            36.0,
            Mm(90.0),
            Mm(125.0),
            &serif_bold,
        );
        layer.use_text(
            "participated in the seminar",
            14.0,
            Mm(115.0),
            Mm(108.0),
            &serif,
        );
        layer.use_text(
            certificate.seminar_title.as_str(),
            20.0,
            Mm(95.0),
            Mm(94.0),
            &serif_bold,
        );
        layer.use_text(
            format!("held on {}", certificate.seminar_date),
            14.0,
            Mm(118.0),
            Mm(80.0),
            &serif,
        );

        if let Some(speaker) = &certificate.speaker_name {
            layer.use_text(
                format!("Speaker: {speaker}"),
                12.0,
                Mm(30.0),
                Mm(45.0),
                &serif,
            );
        }
        if let Some(org) = &certificate.organization {
            layer.use_text(
                format!("Organized with {org}"),
                12.0,
                Mm(30.0),
                Mm(37.0),
                &serif,
            );
        }
        layer.use_text(
            format!("Certificate No: {}", certificate.certificate_id),
            12.0,
            Mm(210.0),
            Mm(37.0),
            &serif,
        );

        doc.save_to_bytes()
            .map_err(|e| DeliveryError::Render(e.to_string()))
    }
}
