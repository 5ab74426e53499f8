use crate::models::appointment::Appointment;
use crate::models::aspirant::Aspirant;
use crate::models::interview_request::ConfirmationDetails;
use crate::services::notification_service::Notification;
use crate::utils::time::{format_date_long, format_time};

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(heading: &str, body: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #1f3a5f;">{heading}</h2>
  {body}
  <p style="color: #777; font-size: 12px;">Este es un mensaje automático, por favor no respondas a este correo.</p>
</div>"#
    )
}

/// Sent to the aspirant right after a request is stored.
pub fn request_received(aspirant: &Aspirant, appointment: &Appointment) -> Notification {
    let body = format!(
        "<p>Hola {name},</p>\
         <p>Recibimos tu solicitud de entrevista (folio #{id}) para el día \
         <strong>{date}</strong> a las <strong>{time}</strong>.</p>\
         <p>Un reclutador revisará tu solicitud y te avisaremos cuando sea confirmada.</p>",
        name = escape_html(&aspirant.full_name()),
        id = appointment.id_solicitud,
        date = format_date_long(appointment.fecha_cita),
        time = format_time(appointment.hora_cita),
    );

    Notification {
        to: aspirant.correo.clone(),
        subject: "Solicitud de entrevista recibida".to_string(),
        html: layout("Solicitud recibida", &body),
    }
}

/// Sent after a recruiter confirms, with the final slot.
pub fn request_confirmed(details: &ConfirmationDetails) -> Notification {
    let body = format!(
        "<p>Hola {name},</p>\
         <p>Tu entrevista (folio #{id}) ha sido <strong>confirmada</strong>.</p>\
         <p>Fecha: <strong>{date}</strong><br/>Hora: <strong>{time}</strong></p>\
         <p>Te esperamos puntualmente.</p>",
        name = escape_html(&format!("{} {}", details.nombre, details.apellidos)),
        id = details.id_solicitud,
        date = format_date_long(details.fecha_cita),
        time = format_time(details.hora_cita),
    );

    Notification {
        to: details.correo.clone(),
        subject: "Tu entrevista ha sido confirmada".to_string(),
        html: layout("Entrevista confirmada", &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn aspirant(nombre: &str) -> Aspirant {
        Aspirant {
            id_aspirante: 1,
            nombre: nombre.to_string(),
            apellidos: "Gomez".to_string(),
            celular: "5550001111".to_string(),
            correo: "ana@x.com".to_string(),
            fecha_registro: Utc::now(),
        }
    }

    fn appointment() -> Appointment {
        Appointment {
            id_cita: 3,
            fecha_cita: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            hora_cita: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            id_solicitud: 7,
            id_reclutador: None,
        }
    }

    #[test]
    fn received_email_targets_aspirant_with_slot() {
        let n = request_received(&aspirant("Ana"), &appointment());
        assert_eq!(n.to, "ana@x.com");
        assert!(n.html.contains("Ana Gomez"));
        assert!(n.html.contains("01/06/2024"));
        assert!(n.html.contains("10:00"));
        assert!(n.html.contains("#7"));
    }

    #[test]
    fn user_input_is_escaped() {
        let n = request_received(&aspirant("<script>alert(1)</script>"), &appointment());
        assert!(!n.html.contains("<script>"));
        assert!(n.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn confirmed_email_carries_new_slot() {
        let details = ConfirmationDetails {
            id_solicitud: 9,
            nombre: "Ana".into(),
            apellidos: "Gomez".into(),
            correo: "ana@x.com".into(),
            fecha_cita: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            hora_cita: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
        };
        let n = request_confirmed(&details);
        assert_eq!(n.subject, "Tu entrevista ha sido confirmada");
        assert!(n.html.contains("03/06/2024"));
        assert!(n.html.contains("16:30"));
    }
}
