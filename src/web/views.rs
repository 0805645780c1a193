//! Server-rendered HTML pages.
//!
//! Each page fills the shared layout's `{{TITLE}}`, `{{FLASH}}` and `{{BODY}}` slots.
//! Every stored value goes through [`escape`] before it reaches the markup.

use crate::model::{LogEntry, Order, OrderFields, OrderStatus};
use crate::web::flash::Flash;
use crate::web::form::{MAX_ADDRESS_LEN, MAX_NAME_LEN};
use crate::web::MARK_COMPLETED_PATH;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}} - Parcel Tracker</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.4rem; text-align: left; }
.flash { padding: 0.6rem; margin-bottom: 1rem; }
.flash-success { background: #e3f6e3; }
.flash-error { background: #f9e0e0; }
form.inline { display: inline; }
</style>
</head>
<body>
<nav><a href="/">Orders</a> | <a href="/add_order">Add order</a> | <a href="/logs">Logs</a></nav>
<h1>{{TITLE}}</h1>
{{FLASH}}
{{BODY}}
</body>
</html>
"#;

const ORDER_FIELDS: &str = r#"<label>Items <input type="number" name="items" value="{{ITEMS}}" required></label><br>
<label>Delivery date <input type="date" name="delivery_date" value="{{DELIVERY_DATE}}" required></label><br>
<label>Sender name <input type="text" name="sender_name" maxlength="{{MAX_NAME}}" value="{{SENDER_NAME}}" required></label><br>
<label>Recipient name <input type="text" name="recipient_name" maxlength="{{MAX_NAME}}" value="{{RECIPIENT_NAME}}" required></label><br>
<label>Recipient address <input type="text" name="recipient_address" maxlength="{{MAX_ADDRESS}}" value="{{RECIPIENT_ADDRESS}}" required></label><br>
<label>Your name <input type="text" name="performer_name"></label><br>
"#;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.level.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();
    LAYOUT
        .replace("{{TITLE}}", &escape(title))
        .replace("{{FLASH}}", &flash)
        .replace("{{BODY}}", body)
}

fn order_inputs(fields: Option<&OrderFields>) -> String {
    let (items, date, sender, recipient, address) = match fields {
        Some(f) => (
            f.items.to_string(),
            f.delivery_date.format("%Y-%m-%d").to_string(),
            escape(&f.sender_name),
            escape(&f.recipient_name),
            escape(&f.recipient_address),
        ),
        None => Default::default(),
    };
    ORDER_FIELDS
        .replace("{{MAX_NAME}}", &MAX_NAME_LEN.to_string())
        .replace("{{MAX_ADDRESS}}", &MAX_ADDRESS_LEN.to_string())
        .replace("{{ITEMS}}", &items)
        .replace("{{DELIVERY_DATE}}", &date)
        .replace("{{SENDER_NAME}}", &sender)
        .replace("{{RECIPIENT_NAME}}", &recipient)
        .replace("{{RECIPIENT_ADDRESS}}", &address)
}

fn order_row(order: &Order) -> String {
    let id = order.id;
    let complete = match order.status {
        OrderStatus::Ongoing => format!(
            r#"<form class="inline" method="post" action="{path}/{id}"><input type="text" name="performer_name" placeholder="Your name"><button type="submit">Mark Order as Completed</button></form>"#,
            path = MARK_COMPLETED_PATH,
        ),
        OrderStatus::Completed => String::new(),
    };
    format!(
        r#"<tr><td>{id}</td><td>{items}</td><td>{date}</td><td>{sender}</td><td>{recipient}</td><td>{address}</td><td>{status}</td><td><a href="/edit_order/{id}">Edit</a> {complete} <form class="inline" method="post" action="/delete_order/{id}"><input type="text" name="performer_name" placeholder="Your name"><button type="submit">Delete</button></form></td></tr>"#,
        items = order.fields.items,
        date = order.fields.delivery_date.format("%Y-%m-%d"),
        sender = escape(&order.fields.sender_name),
        recipient = escape(&order.fields.recipient_name),
        address = escape(&order.fields.recipient_address),
        status = order.status,
    )
}

pub fn orders_page(orders: &[Order], flash: Option<&Flash>) -> String {
    let body = if orders.is_empty() {
        "<p>No orders yet.</p>".to_string()
    } else {
        let rows: String = orders.iter().map(order_row).collect();
        format!(
            "<table>\n<tr><th>Id</th><th>Items</th><th>Delivery date</th><th>Sender</th><th>Recipient</th><th>Address</th><th>Status</th><th>Actions</th></tr>\n{rows}\n</table>"
        )
    };
    layout("Orders", flash, &body)
}

pub fn add_order_page(flash: Option<&Flash>, allow_complete_on_create: bool) -> String {
    let checkbox = if allow_complete_on_create {
        r#"<label><input type="checkbox" name="mark_completed"> Already delivered</label><br>"#
    } else {
        ""
    };
    let body = format!(
        "<form method=\"post\" action=\"/add_order\">\n{}{checkbox}\n<button type=\"submit\">Add order</button>\n</form>",
        order_inputs(None)
    );
    layout("Add order", flash, &body)
}

pub fn edit_order_page(order: &Order, flash: Option<&Flash>) -> String {
    let body = format!(
        "<p>Status: {}</p>\n<form method=\"post\" action=\"/update_order/{}\">\n{}<button type=\"submit\">Save</button>\n</form>",
        order.status,
        order.id,
        order_inputs(Some(&order.fields))
    );
    layout(&format!("Edit order {}", order.id), flash, &body)
}

pub fn logs_page(entries: &[LogEntry], flash: Option<&Flash>) -> String {
    let body = if entries.is_empty() {
        "<p>No actions recorded.</p>".to_string()
    } else {
        let rows: String = entries
            .iter()
            .map(|entry| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                    escape(entry.action.as_str()),
                    escape(&entry.performer)
                )
            })
            .collect();
        format!("<table>\n<tr><th>Time</th><th>Action</th><th>Performed by</th></tr>\n{rows}</table>")
    };
    layout("Logs", flash, &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(title, None, &format!("<p>{}</p>", escape(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;
    use chrono::NaiveDate;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId(4),
            fields: OrderFields {
                items: 2,
                delivery_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                sender_name: "<script>alert(1)</script>".into(),
                recipient_name: "Bob & Co".into(),
                recipient_address: "1 \"Main\" St".into(),
            },
            status,
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn stored_text_is_escaped_in_listing() {
        let html = orders_page(&[order(OrderStatus::Ongoing)], None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Bob &amp; Co"));
        assert!(html.contains("2024-06-30"));
    }

    #[test]
    fn completed_orders_have_no_complete_button() {
        let ongoing = orders_page(&[order(OrderStatus::Ongoing)], None);
        assert!(ongoing.contains("/Mark%20Order%20as%20Completed/4"));

        let completed = orders_page(&[order(OrderStatus::Completed)], None);
        assert!(!completed.contains("Mark%20Order"));
        assert!(completed.contains("/delete_order/4"));
    }

    #[test]
    fn flash_renders_with_level_class() {
        let html = orders_page(&[], Some(&Flash::error("All fields are required!")));
        assert!(html.contains(r#"class="flash flash-error""#));
        assert!(html.contains("All fields are required!"));
        assert!(html.contains("No orders yet."));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = edit_order_page(&order(OrderStatus::Ongoing), None);
        assert!(html.contains(r#"action="/update_order/4""#));
        assert!(html.contains(r#"value="1 &quot;Main&quot; St""#));
        assert!(html.contains(r#"value="2""#));
    }

    #[test]
    fn add_form_checkbox_follows_setting() {
        assert!(!add_order_page(None, false).contains("mark_completed"));
        assert!(add_order_page(None, true).contains(r#"name="mark_completed""#));
    }
}
