use crate::entities::ticket_entity;

const HEADERS: [&str; 6] = [
    "Ticket Number",
    "Name",
    "Email",
    "Phone",
    "Status",
    "Created At",
];

/// 导出某期全部票为 CSV
/// 每个字段都加引号，内部引号双写
pub fn tickets_to_csv(tickets: &[ticket_entity::Model]) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(tickets.len() + 1);
    rows.push(csv_row(HEADERS.iter().map(|h| h.to_string())));

    for t in tickets {
        rows.push(csv_row(
            [
                t.ticket_number.clone(),
                t.name.clone(),
                t.email.clone().unwrap_or_default(),
                t.phone.clone(),
                t.status.to_string(),
                t.created_at.map(|c| c.to_rfc3339()).unwrap_or_default(),
            ]
            .into_iter(),
        ));
    }

    rows.join("\n")
}

fn csv_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TicketStatus;
    use chrono::{TimeZone, Utc};

    fn ticket(name: &str) -> ticket_entity::Model {
        ticket_entity::Model {
            id: 1,
            draw_id: 1,
            name: name.to_string(),
            phone: "+919876543210".to_string(),
            email: Some("buyer@example.com".to_string()),
            id_number: None,
            ticket_number: "LUCKY-0151".to_string(),
            number: 151,
            status: TicketStatus::Booked,
            picked_at: None,
            created_at: Some(Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_header_row() {
        let csv = tickets_to_csv(&[]);
        assert_eq!(
            csv,
            "\"Ticket Number\",\"Name\",\"Email\",\"Phone\",\"Status\",\"Created At\""
        );
    }

    #[test]
    fn test_ticket_row_fields() {
        let csv = tickets_to_csv(&[ticket("Asha Rao")]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"LUCKY-0151\",\"Asha Rao\""));
        assert!(row.contains("\"booked\""));
        assert!(row.contains("2025-09-01"));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = tickets_to_csv(&[ticket("A \"B\" C")]);
        assert!(csv.contains("\"A \"\"B\"\" C\""));
    }
}
