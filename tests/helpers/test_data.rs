//! Test data fixtures

use serde_json::{json, Value};

pub fn admin_user() -> Value {
    json!({
        "id": 1,
        "user_id": "1001",
        "username": "rakan_admin",
        "first_name": "Rakan",
        "last_name": "Admin",
        "is_admin": true,
        "account_type": "premium",
        "approved": true
    })
}

pub fn member_user() -> Value {
    json!({
        "id": 7,
        "user_id": "7007",
        "first_name": "Maya",
        "is_admin": false,
        "account_type": "elite",
        "approved": true,
        "approved_from": "2025-01-01 00:00:00",
        "approved_to": "2025-01-31 00:00:00",
        "days_remaining": 12
    })
}

pub fn video(id: i64, title: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "short_description": format!("About {}", title),
        "long_description": null,
        "photo_file": format!("website-videos/photos/{}.png", id),
        "video_file": format!("website-videos/videos/{}.mp4", id),
        "video_number": id.to_string(),
        "is_active": if is_active { 1 } else { 0 },
        "created_at": "2025-02-01T09:00:00.000000Z",
        "updated_at": "2025-02-01T09:00:00.000000Z"
    })
}

pub fn videos() -> Value {
    json!([
        video(1, "Market Basics", true),
        video(2, "Risk Management", true),
        video(3, "Archived Session", false),
    ])
}

pub fn contact(id: i64, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "company": null,
        "email": email,
        "role": "Trader",
        "message": format!("Hello from {}", name),
        "created_at": "2025-03-01 12:00:00",
        "updated_at": "2025-03-01 12:00:00"
    })
}

pub fn contacts() -> Value {
    json!([
        contact(10, "Omar", "omar@example.com"),
        contact(11, "Sara", "sara@example.com"),
        contact(12, "Yusuf", "yusuf@example.com"),
    ])
}

pub fn registration(id: i64, telegram_id: &str, approved: bool) -> Value {
    json!({
        "id": id,
        "telegram_user_id": telegram_id,
        "username": format!("user{}", id),
        "first_name": null,
        "last_name": null,
        "phone_number": null,
        "email": null,
        "chat_id": telegram_id,
        "conversation_data": {"step": "done"},
        "approved": approved,
        "approved_from": null,
        "approved_to": null,
        "is_admin": false,
        "account_type": null,
        "created_at": "2025-01-10 08:00:00",
        "updated_at": "2025-01-10 08:00:00"
    })
}

pub fn registrations() -> Value {
    Value::Array((1..=6).map(|id| registration(id, &format!("55500{}", id), false)).collect())
}

pub fn stats(approved: u64, pending: u64) -> Value {
    json!({
        "total_users": approved + pending,
        "admin_users": 0,
        "approved_users": approved,
        "pending_users": pending
    })
}

pub fn comment(id: i64, stars: i64, name: &str) -> Value {
    json!({
        "id": id,
        "star_count": stars,
        "comment_text": format!("Review by {}", name),
        "commenter_name": name,
        "commenter_job": "Investor",
        "created_at": "2025-01-05 10:00:00",
        "updated_at": "2025-01-05 10:00:00"
    })
}

pub fn comments() -> Value {
    json!([
        comment(21, 5, "Huda"),
        comment(22, 4, "Karim"),
        comment(23, 5, "Lea"),
    ])
}
