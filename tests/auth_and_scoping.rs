//! Integration tests for login behavior and vendor scoping.

mod common;

use std::sync::Arc;

use secrecy::SecretString;

use next_subscription::adapters::auth::JwtTokenService;
use next_subscription::adapters::crypto::AesGcmCredentialCipher;
use next_subscription::application::handlers::auth::{
    ChangeVendorPasswordCommand, ChangeVendorPasswordHandler, VendorLoginCommand,
    VendorLoginHandler,
};
use next_subscription::application::handlers::product::{
    CreateProductCommand, CreateProductHandler, GetProductHandler, RevealCredentialHandler,
    UpdateProductCommand, UpdateProductHandler,
};
use next_subscription::domain::foundation::{ErrorCode, VendorId};
use next_subscription::domain::product::{PricingPlan, ServiceType};
use next_subscription::domain::vendor::{Vendor, VendorStatus, MIN_PASSWORD_LENGTH};
use next_subscription::ports::{PasswordHasher as _, Role, TokenValidator};

use common::{MockProductRepository, MockVendorRepository, PlainPasswordHasher};

fn token_service() -> Arc<JwtTokenService> {
    let secret = SecretString::new("a-session-secret-of-32-characters!!!".into());
    Arc::new(JwtTokenService::with_secret(&secret, 3600))
}

fn cipher() -> Arc<AesGcmCredentialCipher> {
    let key = SecretString::new("an-encryption-key-of-32-characters!!".into());
    Arc::new(AesGcmCredentialCipher::from_key_material(&key).unwrap())
}

fn vendor(status: VendorStatus, password: &str) -> Vendor {
    let hash = PlainPasswordHasher.hash(password).unwrap();
    let mut vendor = Vendor::new(
        VendorId::new(),
        "Streamline Ltd",
        "owner@streamline.example",
        hash,
        "Ada Owner",
    )
    .unwrap();
    vendor.status = status;
    vendor
}

fn login_handler(repo: Arc<MockVendorRepository>) -> VendorLoginHandler {
    VendorLoginHandler::new(repo, Arc::new(PlainPasswordHasher), token_service())
}

#[tokio::test]
async fn active_vendor_logs_in_and_gets_a_valid_token() {
    let vendor = vendor(VendorStatus::Active, "correct-horse");
    let vendor_id = vendor.id;
    let repo = Arc::new(MockVendorRepository::with_vendor(vendor));

    let result = login_handler(repo)
        .handle(VendorLoginCommand {
            email: "Owner@Streamline.Example".into(),
            password: "correct-horse".into(),
        })
        .await
        .unwrap();

    let actor = token_service().validate(&result.token).unwrap();
    assert_eq!(actor.id, vendor_id.to_string());
    assert_eq!(actor.role, Role::Vendor);
}

#[tokio::test]
async fn wrong_password_is_unauthorized_regardless_of_status() {
    for status in [
        VendorStatus::Pending,
        VendorStatus::Active,
        VendorStatus::Suspended,
        VendorStatus::Rejected,
    ] {
        let repo = Arc::new(MockVendorRepository::with_vendor(vendor(
            status,
            "correct-horse",
        )));
        let err = login_handler(repo)
            .handle(VendorLoginCommand {
                email: "owner@streamline.example".into(),
                password: "battery-staple".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}

#[tokio::test]
async fn correct_password_on_inactive_account_reveals_status() {
    let repo = Arc::new(MockVendorRepository::with_vendor(vendor(
        VendorStatus::Suspended,
        "correct-horse",
    )));
    let err = login_handler(repo)
        .handle(VendorLoginCommand {
            email: "owner@streamline.example".into(),
            password: "correct-horse".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AccountNotActive);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let repo = Arc::new(MockVendorRepository::with_vendor(vendor(
        VendorStatus::Active,
        "correct-horse",
    )));

    let unknown = login_handler(repo.clone())
        .handle(VendorLoginCommand {
            email: "nobody@streamline.example".into(),
            password: "whatever".into(),
        })
        .await
        .unwrap_err();
    let wrong = login_handler(repo)
        .handle(VendorLoginCommand {
            email: "owner@streamline.example".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(unknown.code(), wrong.code());
    assert_eq!(unknown.message(), wrong.message());
}

#[tokio::test]
async fn password_change_requires_the_current_password() {
    let vendor = vendor(VendorStatus::Active, "correct-horse");
    let vendor_id = vendor.id;
    let repo = Arc::new(MockVendorRepository::with_vendor(vendor));
    let handler = ChangeVendorPasswordHandler::new(repo.clone(), Arc::new(PlainPasswordHasher));

    let err = handler
        .handle(ChangeVendorPasswordCommand {
            vendor_id,
            current_password: "wrong".into(),
            new_password: "a-new-password".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unauthorized);

    let err = handler
        .handle(ChangeVendorPasswordCommand {
            vendor_id,
            current_password: "correct-horse".into(),
            new_password: "x".repeat(MIN_PASSWORD_LENGTH - 1),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationFailed);

    handler
        .handle(ChangeVendorPasswordCommand {
            vendor_id,
            current_password: "correct-horse".into(),
            new_password: "a-new-password".into(),
        })
        .await
        .unwrap();

    let stored = repo.vendors.lock().unwrap()[0].clone();
    assert!(stored.initial_password_set);
    assert!(PlainPasswordHasher
        .verify("a-new-password", &stored.password_hash)
        .unwrap());
}

#[tokio::test]
async fn vendor_cannot_reach_another_vendors_product() {
    let products = Arc::new(MockProductRepository::new());
    let owner = VendorId::new();
    let intruder = VendorId::new();

    let product = CreateProductHandler::new(products.clone(), cipher())
        .handle(CreateProductCommand {
            vendor_id: owner,
            provider: "Netflix".into(),
            service_type: ServiceType::AccountShare,
            plan: PricingPlan::new(1, 4_99, "USD").unwrap(),
            stock_count: 2,
            credential: Some("shared@example.com:secret".into()),
        })
        .await
        .unwrap();

    let err = GetProductHandler::new(products.clone())
        .handle(&product.id, &intruder)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProductNotFound);

    let err = UpdateProductHandler::new(products.clone(), cipher())
        .handle(UpdateProductCommand {
            vendor_id: intruder,
            product_id: product.id,
            provider: Some("Hijacked".into()),
            plan: None,
            stock_count: None,
            status: None,
            credential: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProductNotFound);

    let err = RevealCredentialHandler::new(products.clone(), cipher())
        .handle(&product.id, &intruder)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProductNotFound);

    // The owner still sees the untouched product and can decrypt.
    let unchanged = GetProductHandler::new(products.clone())
        .handle(&product.id, &owner)
        .await
        .unwrap();
    assert_eq!(unchanged.provider, "Netflix");

    let revealed = RevealCredentialHandler::new(products, cipher())
        .handle(&product.id, &owner)
        .await
        .unwrap();
    assert_eq!(revealed, "shared@example.com:secret");
}
