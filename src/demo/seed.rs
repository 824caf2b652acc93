use super::store::DemoStore;
use crate::api::resources::Resource;
use crate::core::Result;
use serde_json::{Value as JsonValue, json};

/// Populate `store` with a small, fixed data set.
pub fn seed(store: &mut DemoStore) -> Result<()> {
    let caregivers = [
        ("cg-1", "Jane Doe", "female", "approved", 2),
        ("cg-2", "Mark Ellis", "male", "approved", 0),
        ("cg-3", "jane Okafor", "female", "pending", 0),
        ("cg-4", "Priya Shah", "female", "approved", 5),
        ("cg-5", "Tom Becker", "male", "rejected", 0),
        ("cg-6", "Alex Rivera", "other", "approved", 1),
        ("cg-7", "Grace Kim", "female", "pending", 0),
        ("cg-8", "Omar Haddad", "male", "approved", 3),
        ("cg-9", "Lucy Brown", "female", "approved", 0),
        ("cg-10", "Daniel Novak", "male", "pending", 1),
        ("cg-11", "Hannah Weiss", "female", "approved", 4),
        ("cg-12", "Samuel Ade", "male", "approved", 0),
    ];
    for (id, name, gender, review, allocated) in caregivers {
        insert(
            store,
            Resource::Caregivers,
            json!({
                "id": id,
                "fullName": name,
                "email": email(name),
                "gender": gender,
                "reviewStatus": review,
                "allocatedBookings": allocated,
            }),
        )?;
    }

    let care_seekers = [
        ("cs-1", "Margaret Hill", Some("+44 7700 900001"), "active"),
        ("cs-2", "Robert Chen", None, "active"),
        ("cs-3", "Ines Duarte", Some("+44 7700 900003"), "inactive"),
        ("cs-4", "Walter Price", None, "active"),
    ];
    for (id, name, phone, status) in care_seekers {
        insert(
            store,
            Resource::CareSeekers,
            json!({ "id": id, "fullName": name, "email": email(name), "phone": phone, "status": status }),
        )?;
    }

    let bookings = [
        ("bk-1", "Margaret Hill", Some("Jane Doe"), "accepted", "2026-03-02T09:00:00Z", 4),
        ("bk-2", "Robert Chen", None, "pending", "2026-03-04T14:30:00Z", 2),
        ("bk-3", "Walter Price", Some("Omar Haddad"), "completed", "2026-02-20T08:00:00Z", 6),
        ("bk-4", "Ines Duarte", Some("Priya Shah"), "cancelled", "2026-02-25T10:00:00Z", 3),
        ("bk-5", "Margaret Hill", Some("Priya Shah"), "pending", "2026-03-10T09:00:00Z", 8),
    ];
    for (id, seeker, caregiver, status, at, hours) in bookings {
        insert(
            store,
            Resource::Bookings,
            json!({
                "id": id,
                "careSeekerName": seeker,
                "caregiverName": caregiver,
                "status": status,
                "scheduledAt": at,
                "hours": hours,
            }),
        )?;
    }

    let applications = [
        ("ap-1", "Nadia Petrova", 4, "pending"),
        ("ap-2", "Chris Walsh", 1, "reviewed"),
        ("ap-3", "Fatima Noor", 9, "accepted"),
    ];
    for (id, name, years, status) in applications {
        insert(
            store,
            Resource::Applications,
            json!({ "id": id, "fullName": name, "email": email(name), "experienceYears": years, "status": status }),
        )?;
    }

    let blogs = [
        ("bl-1", "Choosing a home carer", "choosing-a-home-carer", true),
        ("bl-2", "Respite care explained", "respite-care-explained", true),
        ("bl-3", "Winter safety checklist", "winter-safety-checklist", false),
    ];
    for (id, title, slug, published) in blogs {
        insert(
            store,
            Resource::Blogs,
            json!({
                "id": id,
                "title": title,
                "slug": slug,
                "author": "Editorial team",
                "published": published,
                "createdAt": "2026-01-15T12:00:00Z",
            }),
        )?;
    }

    let testimonials = [
        ("ts-1", "Eleanor", "The carers were kind and always on time.", 5),
        ("ts-2", "Victor", "Booking was simple and support answered quickly.", 4),
    ];
    for (id, name, quote, rating) in testimonials {
        insert(
            store,
            Resource::Testimonials,
            json!({ "id": id, "name": name, "quote": quote, "rating": rating }),
        )?;
    }

    let faqs = [
        ("fq-1", "How are caregivers vetted?", "Every caregiver passes an interview and background check."),
        ("fq-2", "Can I cancel a booking?", "Yes, up to 24 hours before the visit."),
    ];
    for (id, question, answer) in faqs {
        insert(
            store,
            Resource::Faqs,
            json!({ "id": id, "question": question, "answer": answer }),
        )?;
    }

    insert(
        store,
        Resource::LocationServices,
        json!({
            "id": "loc-1",
            "city": "Manchester",
            "slug": "manchester",
            "services": [
                { "id": "svc-1", "title": "Companionship", "description": "Regular visits and conversation." },
                { "id": "svc-2", "title": "Personal care", "description": "Help with washing and dressing." },
            ],
        }),
    )?;
    insert(
        store,
        Resource::LocationServices,
        json!({ "id": "loc-2", "city": "Bristol", "slug": "bristol", "services": [] }),
    )?;

    insert(
        store,
        Resource::ResourceCards,
        json!({
            "id": "rc-1",
            "title": "Dementia care guide",
            "badges": [
                { "id": "bd-1", "label": "Free" },
                { "id": "bd-2", "label": "PDF" },
                { "id": "bd-3", "label": "New" },
                { "id": "bd-4", "label": "Popular" },
            ],
        }),
    )?;
    insert(
        store,
        Resource::ResourceCards,
        json!({ "id": "rc-2", "title": "Funding your care", "badges": [] }),
    )?;

    store.set_about(json!({
        "heading": "About us",
        "points": [
            { "id": "pt-1", "title": "Vetted carers", "description": "Background checked." },
            { "id": "pt-2", "title": "Flexible hours", "description": "Book by the hour." },
        ],
        "gallery": [
            { "id": "gi-1", "url": "https://cdn.example.com/about/team.jpg", "alt": "Care team" },
            { "id": "gi-2", "url": "https://cdn.example.com/about/visit.jpg", "alt": "Home visit" },
            { "id": "gi-3", "url": "https://cdn.example.com/about/office.jpg" },
        ],
    }));

    Ok(())
}

fn insert(store: &mut DemoStore, resource: Resource, record: JsonValue) -> Result<()> {
    store
        .insert(resource, record)
        .map_err(|err| crate::core::ConsoleError::Config(format!("seed data rejected: {err}")))?;
    Ok(())
}

fn email(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "."))
}
