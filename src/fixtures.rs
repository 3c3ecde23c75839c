//! Demo records used to seed a dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::records::{Customer, CustomerStatus, Deal, DealStage, RecordId, Segment};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture date is valid")
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_time(chrono::NaiveTime::MIN).and_utc()
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    company_name: &str,
    contact_person: &str,
    email: &str,
    phone: &str,
    address: &str,
    registered: NaiveDate,
    last_activity: NaiveDate,
    revenue: i64,
    status: CustomerStatus,
    segment: Segment,
    notes: &str,
) -> Customer {
    Customer {
        id: RecordId::from(id),
        company_name: company_name.to_string(),
        contact_person: contact_person.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        registration_date: registered,
        last_activity,
        total_revenue: Decimal::new(revenue, 0),
        status,
        segment,
        notes: notes.to_string(),
    }
}

pub fn customers() -> Vec<Customer> {
    vec![
        customer(
            "1",
            "TechCorp Industries",
            "John Smith",
            "john.smith@techcorp.com",
            "+1 (555) 123-4567",
            "123 Tech Street, San Francisco, CA 94105",
            date(2022, 3, 15),
            date(2024, 1, 15),
            125_000,
            CustomerStatus::Active,
            Segment::Enterprise,
            "High-value client with potential for expansion",
        ),
        customer(
            "2",
            "Global Dynamics LLC",
            "Sarah Johnson",
            "sarah.j@globaldynamics.com",
            "+1 (555) 987-6543",
            "456 Business Ave, New York, NY 10001",
            date(2022, 7, 22),
            date(2024, 1, 14),
            89_000,
            CustomerStatus::Active,
            Segment::Sme,
            "Regular customer with good payment history",
        ),
        customer(
            "3",
            "Innovation Partners",
            "Mike Chen",
            "mike@innovationpartners.com",
            "+1 (555) 456-7890",
            "789 Innovation Blvd, Austin, TX 73301",
            date(2023, 1, 10),
            date(2024, 1, 12),
            156_000,
            CustomerStatus::Active,
            Segment::Enterprise,
            "Fast-growing startup with high potential",
        ),
        customer(
            "4",
            "Digital Solutions Inc",
            "Lisa Park",
            "lisa.park@digitalsolutions.com",
            "+1 (555) 321-0987",
            "321 Digital Way, Seattle, WA 98101",
            date(2023, 5, 18),
            date(2024, 1, 10),
            67_000,
            CustomerStatus::Prospect,
            Segment::Sme,
            "Interested in our premium package",
        ),
        customer(
            "5",
            "NextGen Systems",
            "Robert Wilson",
            "robert@nextgensystems.com",
            "+1 (555) 654-3210",
            "654 Future St, Boston, MA 02101",
            date(2023, 9, 3),
            date(2024, 1, 8),
            198_000,
            CustomerStatus::Active,
            Segment::Enterprise,
            "Long-term contract, very satisfied customer",
        ),
    ]
}

struct DealSeed {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    value: i64,
    stage: DealStage,
    probability: u8,
    assignee: &'static str,
    source: &'static str,
    expected_close: (i32, u32, u32),
    created: (i32, u32, u32),
    last_activity: (i32, u32, u32),
    description: &'static str,
    next_action: &'static str,
}

impl From<DealSeed> for Deal {
    fn from(seed: DealSeed) -> Self {
        let (ey, em, ed) = seed.expected_close;
        let (cy, cm, cd) = seed.created;
        let (ly, lm, ld) = seed.last_activity;
        Deal {
            id: RecordId::from(seed.id),
            title: seed.title.to_string(),
            company: seed.company.to_string(),
            value: Decimal::new(seed.value, 0),
            stage: seed.stage,
            probability: seed.probability,
            assignee: seed.assignee.to_string(),
            source: seed.source.to_string(),
            expected_close_date: date(ey, em, ed),
            actual_close_date: None,
            created_date: midnight(cy, cm, cd),
            last_activity: midnight(ly, lm, ld),
            description: seed.description.to_string(),
            next_action: seed.next_action.to_string(),
        }
    }
}

pub fn deals() -> Vec<Deal> {
    let seeds = [
        DealSeed {
            id: "1",
            title: "Enterprise CRM License",
            company: "TechCorp Industries",
            value: 125_000,
            stage: DealStage::Negotiation,
            probability: 85,
            assignee: "Sarah Chen",
            source: "Inbound",
            expected_close: (2024, 2, 15),
            created: (2023, 12, 1),
            last_activity: (2024, 1, 15),
            description: "Large enterprise deal for comprehensive CRM solution",
            next_action: "Schedule final pricing discussion with decision makers",
        },
        DealSeed {
            id: "2",
            title: "Marketing Automation Package",
            company: "Global Dynamics LLC",
            value: 89_000,
            stage: DealStage::Proposal,
            probability: 70,
            assignee: "Michael Torres",
            source: "Referral",
            expected_close: (2024, 2, 20),
            created: (2023, 11, 15),
            last_activity: (2024, 1, 14),
            description: "Marketing automation solution for growing business",
            next_action: "Follow up on proposal feedback",
        },
        DealSeed {
            id: "3",
            title: "Sales Analytics Suite",
            company: "Innovation Partners",
            value: 156_000,
            stage: DealStage::Qualification,
            probability: 60,
            assignee: "Jessica Kim",
            source: "Website",
            expected_close: (2024, 3, 1),
            created: (2024, 1, 5),
            last_activity: (2024, 1, 12),
            description: "Advanced analytics and reporting solution",
            next_action: "Conduct needs assessment meeting",
        },
        DealSeed {
            id: "4",
            title: "Customer Support Platform",
            company: "Digital Solutions Inc",
            value: 67_000,
            stage: DealStage::Prospecting,
            probability: 40,
            assignee: "David Wilson",
            source: "Cold Outreach",
            expected_close: (2024, 3, 15),
            created: (2024, 1, 10),
            last_activity: (2024, 1, 10),
            description: "Support ticketing and customer service solution",
            next_action: "Schedule discovery call",
        },
    ];
    seeds.into_iter().map(Deal::from).collect()
}
