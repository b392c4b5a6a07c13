use chrono::NaiveDate;
use vendor_hub::domain::event::NewEvent;
use vendor_hub::domain::favorites::FavoriteRef;
use vendor_hub::domain::message::NewMessage;
use vendor_hub::domain::service::{NewService, ServiceUpdate};
use vendor_hub::domain::types::{
    CategoryId, CityName, EventName, ImageUrl, MessageBody, MessageSender, PriceRange,
    ServiceDescription, ServiceId, ServiceName, StateName, UserId, VendorDescription, VendorId,
    VendorName, VendorSlug,
};
use vendor_hub::domain::vendor::VendorProfile;
use vendor_hub::repository::{
    DieselRepository, EventReader, EventWriter, FavoriteReader, FavoriteWriter, MessageReader,
    MessageWriter, ServiceReader, ServiceWriter, VendorReader, VendorSearchQuery, VendorWriter,
};

mod common;

fn profile(id: &str, name: &str, state: &str, city: &str) -> VendorProfile {
    VendorProfile {
        id: VendorId::new(id).expect("valid vendor id"),
        name: VendorName::new(name).expect("valid vendor name"),
        tagline: None,
        description: VendorDescription::new("Music for every party").expect("valid description"),
        state: StateName::new(state).expect("valid state"),
        city: CityName::new(city).expect("valid city"),
        category_ids: vec![
            CategoryId::new("djs").expect("valid category"),
            CategoryId::new("bands").expect("valid category"),
        ],
        profile_image: Some(ImageUrl::new("/uploads/profile.jpg").expect("valid image url")),
        banner_image: None,
        contact_email: None,
        phone_number: None,
        website: None,
    }
}

fn new_service(vendor_id: &str, name: &str, photos: &[&str]) -> NewService {
    NewService::new(
        VendorId::new(vendor_id).expect("valid vendor id"),
        ServiceName::new(name).expect("valid service name"),
        ServiceDescription::new("Six hours of music").expect("valid description"),
        CategoryId::new("djs").expect("valid category"),
        photos
            .iter()
            .map(|p| ImageUrl::new(*p).expect("valid image url"))
            .collect(),
        Some(PriceRange::new("$500 - $1500").expect("valid price range")),
    )
    .expect("valid service")
}

fn client(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

#[test]
fn colliding_names_get_numeric_slug_suffixes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should create first vendor");
    let second = repo
        .save_vendor_profile(&profile("v2", "Spin Doctors", "Texas", "Austin"))
        .expect("should create second vendor");
    let third = repo
        .save_vendor_profile(&profile("v3", "Spin  doctors!", "Texas", "Dallas"))
        .expect("should create third vendor");

    assert_eq!(first.slug, "spin-doctors");
    assert_eq!(second.slug, "spin-doctors-2");
    assert_eq!(third.slug, "spin-doctors-3");

    // Re-saving keeps the vendor's own slug.
    let resaved = repo
        .save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should update first vendor");
    assert_eq!(resaved.slug, "spin-doctors");
}

#[test]
fn update_keeps_image_and_replaces_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should create vendor");

    let mut update = profile("v1", "Spin Doctors", "Texas", "Austin");
    update.profile_image = None;
    update.category_ids = vec![CategoryId::new("photographers").expect("valid category")];
    let vendor = repo
        .save_vendor_profile(&update)
        .expect("should update vendor");

    assert_eq!(vendor.profile_image, "/uploads/profile.jpg");
    assert_eq!(vendor.category_ids.len(), 1);
    assert_eq!(vendor.category_ids[0], "photographers");
}

#[test]
fn new_vendor_without_image_is_rejected() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut missing = profile("v1", "Spin Doctors", "Texas", "Austin");
    missing.profile_image = None;

    assert!(repo.save_vendor_profile(&missing).is_err());
    assert!(
        repo.get_vendor_by_id(&VendorId::new("v1").unwrap())
            .expect("lookup should succeed")
            .is_none()
    );
}

#[test]
fn search_candidates_are_narrowed_case_insensitively() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_vendor_profile(&profile("v1", "Austin Beats", "Texas", "Austin"))
        .expect("should create vendor");
    repo.save_vendor_profile(&profile("v2", "Dallas Beats", "Texas", "Dallas"))
        .expect("should create vendor");
    repo.create_service(&new_service("v1", "Wedding DJ", &["/uploads/a.jpg"]))
        .expect("should create service");

    let candidates = repo
        .list_search_candidates(VendorSearchQuery::default().state("texas").city(" AUSTIN "))
        .expect("should list candidates");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].vendor.id, "v1");
    assert_eq!(candidates[0].services.len(), 1);

    let everyone = repo
        .list_search_candidates(VendorSearchQuery::default().state("Texas"))
        .expect("should list candidates");
    assert_eq!(everyone.len(), 2);
}

#[test]
fn services_keep_photo_order_and_ownership() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should create vendor");
    repo.save_vendor_profile(&profile("v2", "Bloom", "Texas", "Austin"))
        .expect("should create vendor");

    let service = repo
        .create_service(&new_service(
            "v1",
            "Wedding DJ",
            &["/uploads/c.jpg", "/uploads/a.jpg", "/uploads/b.jpg"],
        ))
        .expect("should create service");

    let loaded = repo
        .get_service_by_id(service.id)
        .expect("lookup should succeed")
        .expect("service should exist");
    let photos: Vec<&str> = loaded.photos.iter().map(|p| p.as_str()).collect();
    assert_eq!(photos, vec!["/uploads/c.jpg", "/uploads/a.jpg", "/uploads/b.jpg"]);

    let update = ServiceUpdate {
        name: ServiceName::new("Reception DJ").unwrap(),
        description: ServiceDescription::new("Eight hours").unwrap(),
        category_id: CategoryId::new("djs").unwrap(),
        price_range: None,
    };
    let other = VendorId::new("v2").unwrap();
    let owner = VendorId::new("v1").unwrap();

    assert_eq!(repo.update_service(service.id, &other, &update).unwrap(), 0);
    assert_eq!(repo.delete_service(service.id, &other).unwrap(), 0);
    assert_eq!(repo.update_service(service.id, &owner, &update).unwrap(), 1);

    let listing = repo
        .get_vendor_by_slug(&VendorSlug::new("spin-doctors").unwrap())
        .expect("lookup should succeed")
        .expect("vendor should exist");
    assert_eq!(listing.services[0].name, "Reception DJ");
    assert!(listing.services[0].price_range.is_none());

    assert_eq!(repo.delete_service(service.id, &owner).unwrap(), 1);
    assert!(repo.get_service_by_id(service.id).unwrap().is_none());
}

#[test]
fn batched_lookups_skip_missing_ids() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should create vendor");
    let service = repo
        .create_service(&new_service("v1", "Wedding DJ", &["/uploads/a.jpg"]))
        .expect("should create service");

    let vendors = repo
        .get_vendors_by_ids(&[VendorId::new("v1").unwrap(), VendorId::new("v9").unwrap()])
        .expect("should load vendors");
    assert_eq!(vendors.len(), 1);

    let services = repo
        .get_services_by_ids(&[service.id, ServiceId::new(999).unwrap()])
        .expect("should load services");
    assert_eq!(services.len(), 1);

    assert!(repo.get_services_by_ids(&[]).unwrap().is_empty());
}

#[test]
fn client_favorites_behave_like_a_set() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let casey = client("c1");
    let reference = FavoriteRef::parse("v1_1").expect("valid reference");

    repo.add_client_favorite(&casey, &reference)
        .expect("should add favorite");
    repo.add_client_favorite(&casey, &reference)
        .expect("adding again should succeed");
    assert_eq!(
        repo.list_client_favorites(&casey).unwrap(),
        vec!["v1_1".to_string()]
    );

    assert_eq!(repo.remove_client_favorite(&casey, "v9_9").unwrap(), 0);
    assert_eq!(repo.remove_client_favorite(&casey, "v1_1").unwrap(), 1);
    assert!(repo.list_client_favorites(&casey).unwrap().is_empty());

    // Favorites are per client.
    repo.add_client_favorite(&client("c2"), &reference).unwrap();
    assert!(repo.list_client_favorites(&casey).unwrap().is_empty());
}

#[test]
fn events_are_scoped_to_their_client() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let casey = client("c1");

    let later = repo
        .create_event(&NewEvent {
            client_id: casey.clone(),
            name: EventName::new("Reception").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        })
        .expect("should create event");
    let sooner = repo
        .create_event(&NewEvent {
            client_id: casey.clone(),
            name: EventName::new("Rehearsal").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
        })
        .expect("should create event");

    let reference = FavoriteRef::parse("v1_1").unwrap();
    repo.add_event_favorite(later.id, &reference).unwrap();
    repo.add_event_favorite(later.id, &reference).unwrap();

    let events = repo.list_events(&casey).expect("should list events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, sooner.id.get());
    assert_eq!(events[1].favorites, vec!["v1_1".to_string()]);

    assert!(repo.get_event_by_id(later.id, &client("c2")).unwrap().is_none());
    assert_eq!(repo.delete_event(later.id, &client("c2")).unwrap(), 0);

    assert_eq!(repo.remove_event_favorite(later.id, "v1_1").unwrap(), 1);
    assert_eq!(repo.delete_event(later.id, &casey).unwrap(), 1);
    assert_eq!(repo.list_events(&casey).unwrap().len(), 1);
}

#[test]
fn threads_summarize_latest_message() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.save_vendor_profile(&profile("v1", "Spin Doctors", "Texas", "Austin"))
        .expect("should create vendor");
    repo.save_vendor_profile(&profile("v2", "Bloom", "Texas", "Austin"))
        .expect("should create vendor");

    let send = |vendor: &str, sender: MessageSender, body: &str| {
        repo.create_message(&NewMessage {
            client_id: client("c1"),
            client_name: "Casey".to_string(),
            vendor_id: VendorId::new(vendor).unwrap(),
            sender,
            body: MessageBody::new(body).unwrap(),
        })
        .expect("should create message")
    };

    send("v1", MessageSender::Client, "Hi, are you free?");
    send("v1", MessageSender::Vendor, "Yes we are");
    send("v2", MessageSender::Client, "Do you do bouquets?");

    let thread = repo
        .list_thread(&client("c1"), &VendorId::new("v1").unwrap())
        .expect("should list thread");
    let bodies: Vec<&str> = thread.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["Hi, are you free?", "Yes we are"]);

    let threads = repo
        .list_client_threads(&client("c1"))
        .expect("should list threads");
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].vendor_id, "v2");
    assert_eq!(threads[1].message_count, 2);
    assert_eq!(threads[1].last_message.sender, MessageSender::Vendor);

    let inbox = repo
        .list_vendor_threads(&VendorId::new("v1").unwrap())
        .expect("should list vendor threads");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].client_name, "Casey");
}
