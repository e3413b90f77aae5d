//! Plain-text rendering of view state.

use std::io::{self, Write};

use shopdesk_admin::ViewState;
use shopdesk_core::{Cart, DashboardSnapshot, Notification, Product};

/// Widest a table cell may get before it is cut.
const MAX_CELL: usize = 48;

/// A left-aligned text table.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows
            .push(cells.into_iter().map(|c| truncate(&c, MAX_CELL)).collect());
    }

    fn write(&self, out: &mut impl Write) -> io::Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(out, self.headers.iter().copied(), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(out, rule.iter().map(String::as_str), &widths)?;
        for row in &self.rows {
            write_line(out, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_line<'a>(
    out: &mut impl Write,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Cut `text` to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max {
        return text;
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn products(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products.");
    }
    let mut table = Table::new(&[
        "ID", "NAME", "BRAND", "CATEGORY", "PRICE", "STOCK", "AVAILABLE", "BESTSELLER",
    ]);
    for p in products {
        table.row(vec![
            p.id.to_string(),
            p.name.clone(),
            p.brand.clone(),
            p.category.clone(),
            p.price.to_string(),
            p.stock.to_string(),
            yes_no(p.available).to_string(),
            yes_no(p.bestseller).to_string(),
        ]);
    }
    table.write(out)
}

pub fn product_detail(out: &mut impl Write, p: &Product) -> io::Result<()> {
    writeln!(out, "{} ({})", p.name, p.id)?;
    writeln!(out, "  Brand:       {}", p.brand)?;
    writeln!(out, "  Category:    {}", p.category)?;
    writeln!(out, "  Price:       {}", p.price)?;
    writeln!(out, "  Stock:       {}", p.stock)?;
    writeln!(out, "  Available:   {}", yes_no(p.available))?;
    writeln!(out, "  Bestseller:  {}", yes_no(p.bestseller))?;
    writeln!(out, "  Image:       {}", p.image_url)?;
    writeln!(out, "  Description: {}", p.description)?;
    if !p.specifications.is_empty() {
        writeln!(out, "  Specifications:")?;
        for (key, value) in p.specifications.iter() {
            writeln!(out, "    {key}: {value}")?;
        }
    }
    Ok(())
}

pub fn carts(out: &mut impl Write, carts: &[Cart]) -> io::Result<()> {
    if carts.is_empty() {
        return writeln!(out, "No carts.");
    }
    let mut table = Table::new(&["ID", "USER", "ITEM", "QTY", "TOTAL", "STATUS"]);
    for c in carts {
        table.row(vec![
            c.id.to_string(),
            c.user_id.to_string(),
            c.item_data.name.clone(),
            c.total_items.to_string(),
            c.total_price.to_string(),
            c.status.to_string(),
        ]);
    }
    table.write(out)
}

/// Comments, each followed by its replies when `with_replies` is set.
pub fn comments(out: &mut impl Write, state: &ViewState, with_replies: bool) -> io::Result<()> {
    if state.comments().is_empty() {
        return writeln!(out, "No comments.");
    }
    for comment in state.comments() {
        writeln!(
            out,
            "[{}] {} on {}: {}",
            comment.id, comment.user_data.name, comment.product_data.name, comment.text
        )?;
        if with_replies {
            for reply in state.replies_for(&comment.id) {
                writeln!(out, "    ↳ [{}] {}", reply.id, reply.text)?;
            }
        }
    }
    Ok(())
}

fn created_at(n: &Notification) -> String {
    n.created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub fn notifications(out: &mut impl Write, notifications: &[Notification]) -> io::Result<()> {
    if notifications.is_empty() {
        return writeln!(out, "No notifications.");
    }
    let mut table = Table::new(&["ID", "USER", "CREATED", "READ", "TEXT"]);
    for n in notifications {
        table.row(vec![
            n.id.to_string(),
            n.user_id.to_string(),
            created_at(n),
            yes_no(n.is_read).to_string(),
            n.text.clone(),
        ]);
    }
    table.write(out)
}

pub fn notification_detail(out: &mut impl Write, n: &Notification) -> io::Result<()> {
    writeln!(out, "Notification {}", n.id)?;
    writeln!(out, "  User:    {}", n.user_id)?;
    writeln!(out, "  Created: {}", created_at(n))?;
    writeln!(out, "  Read:    {}", yes_no(n.is_read))?;
    writeln!(out, "  {}", n.text)
}

pub fn dashboard(out: &mut impl Write, snapshot: &DashboardSnapshot) -> io::Result<()> {
    for (label, count) in snapshot.counts() {
        writeln!(out, "{label:<10} {count}")?;
    }
    writeln!(out)?;
    if snapshot.latest_users.is_empty() {
        return writeln!(out, "No recent users.");
    }
    let mut table = Table::new(&["LATEST USERS", "EMAIL"]);
    for user in &snapshot.latest_users {
        table.row(vec![user.name.clone(), user.email.clone()]);
    }
    table.write(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopdesk_core::{CartId, CartItem, CartStatus, ProductId};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Điện thoại thông minh", 6), "Điện …");
        assert_eq!(truncate("two\nlines", 20), "two lines");
    }

    #[test]
    fn test_product_table_aligns_columns() {
        let items = vec![
            Product {
                id: ProductId::new("p1"),
                name: "iPhone 12".to_string(),
                available: true,
                ..Product::default()
            },
            Product {
                id: ProductId::new("p22"),
                name: "Dell XPS".to_string(),
                ..Product::default()
            },
        ];
        let text = render(|out| products(out, &items));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID   NAME"));
        assert!(lines[2].starts_with("p1   iPhone 12"));
        assert!(lines[2].contains("yes"));
    }

    #[test]
    fn test_cart_table() {
        let items = vec![Cart {
            id: CartId::new("c1"),
            item_data: CartItem {
                name: "Phone X".to_string(),
                image_url: String::new(),
            },
            total_items: 2,
            status: CartStatus::Shipped,
            ..Cart::default()
        }];
        let text = render(|out| carts(out, &items));
        assert!(text.contains("Phone X"));
        assert!(text.contains("shipped"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(render(|out| products(out, &[])), "No products.\n");
        assert_eq!(render(|out| notifications(out, &[])), "No notifications.\n");
    }
}
