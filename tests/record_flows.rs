use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crm_dashboard_lib::crud::{
    CustomerCriteria, CustomerManager, DealCriteria, DealManager, DialogState, FieldFilter,
};
use crm_dashboard_lib::error::{FlowError, RecordError};
use crm_dashboard_lib::fixtures;
use crm_dashboard_lib::records::{
    Customer, CustomerField, CustomerStatus, DealField, DealStage, RecordId, Segment,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 15, 0, 0).unwrap()
}

fn techcorp_only() -> Vec<Customer> {
    fixtures::customers()
        .into_iter()
        .filter(|c| c.id.as_str() == "1")
        .collect()
}

#[test]
fn search_then_status_filter_on_single_record() {
    let mut customers = CustomerManager::with_clock(techcorp_only(), fixed_now).unwrap();

    customers.set_search("tech");
    let visible = customers.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].company_name, "TechCorp Industries");

    customers.set_criteria(CustomerCriteria {
        status: FieldFilter::Only(CustomerStatus::Churned),
        ..Default::default()
    });
    assert!(customers.visible().is_empty());
}

#[test]
fn create_flow_adds_one_record() {
    let mut customers = CustomerManager::with_clock(fixtures::customers(), fixed_now).unwrap();
    let before = customers.records().len();

    customers.open_create().unwrap();
    assert_eq!(customers.dialog(), &DialogState::Creating);
    customers
        .set_field(CustomerField::CompanyName("Acme".into()))
        .unwrap();
    customers
        .set_field(CustomerField::ContactPerson("Road Runner".into()))
        .unwrap();
    customers
        .set_field(CustomerField::Email("beep@acme.test".into()))
        .unwrap();

    let notice = customers.submit().unwrap();
    assert_eq!(notice.title, "Customer Created");
    assert_eq!(notice.description, "Acme has been added successfully.");
    assert_eq!(customers.dialog(), &DialogState::Closed);
    assert!(customers.draft().is_none());

    assert_eq!(customers.records().len(), before + 1);
    let added = customers.store().get(&notice.record_id).unwrap();
    assert_eq!(added.company_name, "Acme");
    assert_eq!(added.status, CustomerStatus::Prospect);
    assert_eq!(added.segment, Segment::Sme);
    assert_eq!(added.total_revenue, Decimal::ZERO);
    assert_eq!(added.registration_date, fixed_now().date_naive());
}

#[test]
fn edit_flow_changes_only_status_and_activity() {
    let mut customers = CustomerManager::with_clock(fixtures::customers(), fixed_now).unwrap();
    let id = RecordId::from("1");
    let original = customers.store().get(&id).cloned().unwrap();
    let others: Vec<Customer> = customers
        .records()
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();

    customers.open_edit(&id).unwrap();
    customers
        .set_field(CustomerField::Status(CustomerStatus::Inactive))
        .unwrap();
    let notice = customers.submit().unwrap();
    assert_eq!(notice.title, "Customer Updated");

    let updated = customers.store().get(&id).unwrap();
    assert_eq!(updated.status, CustomerStatus::Inactive);
    assert_eq!(updated.company_name, original.company_name);
    assert_eq!(updated.last_activity, fixed_now().date_naive());
    assert_eq!(
        Customer {
            status: original.status,
            last_activity: original.last_activity,
            ..updated.clone()
        },
        original
    );

    let after: Vec<Customer> = customers
        .records()
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();
    assert_eq!(after, others);
}

#[test]
fn rejected_submit_keeps_draft_open() {
    let mut customers = CustomerManager::with_clock(fixtures::customers(), fixed_now).unwrap();
    let before = customers.records().to_vec();

    customers.open_create().unwrap();
    customers
        .set_field(CustomerField::CompanyName("No Contact Ltd".into()))
        .unwrap();
    let err = customers.submit().unwrap_err();
    assert!(matches!(
        err,
        FlowError::Record(RecordError::Validation { .. })
    ));

    assert_eq!(customers.dialog(), &DialogState::Creating);
    assert!(customers.draft().is_some());
    assert_eq!(customers.records(), &before[..]);

    customers.cancel().unwrap();
    assert_eq!(customers.dialog(), &DialogState::Closed);
    assert!(customers.draft().is_none());
}

#[test]
fn delete_flow_removes_exactly_one() {
    let mut deals = DealManager::with_clock(fixtures::deals(), fixed_now).unwrap();
    let id = RecordId::from("2");

    deals.open_delete(&id).unwrap();
    assert_eq!(deals.subject().map(|d| &d.id), Some(&id));
    let notice = deals.confirm_delete().unwrap();
    assert!(notice.destructive);
    assert_eq!(deals.records().len(), 3);
    assert!(deals.store().get(&id).is_none());

    let err = deals.open_delete(&id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(deals.records().len(), 3);
    assert_eq!(deals.dialog(), &DialogState::Closed);
}

#[test]
fn deal_edit_and_filters_work_together() {
    let mut deals = DealManager::with_clock(fixtures::deals(), fixed_now).unwrap();
    let id = RecordId::from("1");

    deals.open_edit(&id).unwrap();
    deals.set_field(DealField::Stage(DealStage::ClosedWon)).unwrap();
    deals.set_field(DealField::Probability(100)).unwrap();
    deals
        .set_field(DealField::ActualCloseDate(NaiveDate::from_ymd_opt(2024, 2, 9)))
        .unwrap();
    deals.submit().unwrap();

    let won = deals.store().get(&id).unwrap();
    assert_eq!(won.stage, DealStage::ClosedWon);
    assert_eq!(won.last_activity, fixed_now());

    deals.set_criteria(DealCriteria {
        stage: FieldFilter::Only(DealStage::ClosedWon),
        ..Default::default()
    });
    let visible: Vec<_> = deals.visible().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(visible, vec!["1"]);
}

#[test]
fn opening_a_second_dialog_is_refused() {
    let mut customers = CustomerManager::with_clock(fixtures::customers(), fixed_now).unwrap();
    customers.open_view(&RecordId::from("3")).unwrap();

    let err = customers.open_create().unwrap_err();
    assert!(matches!(err, FlowError::InvalidTransition { .. }));
    assert_eq!(customers.dialog(), &DialogState::Viewing(RecordId::from("3")));

    customers.close_all();
    assert_eq!(customers.dialog(), &DialogState::Closed);
}

#[test]
fn duplicate_seed_id_is_refused() {
    let mut seeds = fixtures::customers();
    let mut shadow = seeds[0].clone();
    shadow.company_name = "Shadow Corp".to_string();
    seeds.push(shadow);

    let err = CustomerManager::with_clock(seeds, fixed_now).err().unwrap();
    assert_eq!(
        err,
        RecordError::DuplicateId {
            kind: "customer",
            id: RecordId::from("1"),
        }
    );
}

#[test]
fn invalid_seed_is_refused() {
    let mut seeds = fixtures::deals();
    seeds[2].probability = 140;
    let err = DealManager::with_clock(seeds, fixed_now).err().unwrap();
    assert!(matches!(err, RecordError::Range { field: "probability", .. }));
}

#[test]
fn deal_create_flow_uses_pipeline_defaults() {
    let mut deals = DealManager::with_clock(fixtures::deals(), fixed_now).unwrap();

    deals.open_create().unwrap();
    let draft = deals.draft().cloned().unwrap();
    assert_eq!(draft.stage, Some(DealStage::Prospecting));
    assert_eq!(draft.probability, Some(25));
    assert_eq!(draft.value, Some(Decimal::ZERO));
    assert_eq!(draft.expected_close_date, Some(fixed_now().date_naive()));

    let err = deals.submit().unwrap_err();
    assert!(matches!(
        err,
        FlowError::Record(RecordError::Validation { field: "title", .. })
    ));
    assert_eq!(deals.dialog(), &DialogState::Creating);
    assert_eq!(deals.records().len(), 4);

    deals.set_field(DealField::Title("Data Warehouse".into())).unwrap();
    deals.set_field(DealField::Company("Acme".into())).unwrap();
    deals.set_field(DealField::Value(Decimal::new(40_000, 0))).unwrap();
    let notice = deals.submit().unwrap();
    assert_eq!(notice.title, "Deal Created");
    assert_eq!(notice.description, "Data Warehouse has been added successfully.");

    let created = deals.store().get(&notice.record_id).unwrap();
    assert_eq!(created.created_date, fixed_now());
    assert_eq!(created.last_activity, fixed_now());
    assert_eq!(created.stage, DealStage::Prospecting);
    assert_eq!(created.probability, 25);
    assert_eq!(created.actual_close_date, None);
    assert_eq!(deals.records().len(), 5);
}

#[test]
fn clearing_filters_shows_everything_again() {
    let mut deals = DealManager::with_clock(fixtures::deals(), fixed_now).unwrap();
    assert!(!deals.has_active_filters());

    deals.set_criteria(DealCriteria {
        assignee: FieldFilter::Only("Sarah Chen".to_string()),
        ..Default::default()
    });
    assert!(deals.has_active_filters());
    assert_eq!(deals.visible().len(), 1);

    deals.clear_filters();
    assert!(!deals.has_active_filters());
    assert_eq!(deals.visible().len(), 4);
}
