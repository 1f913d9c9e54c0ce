//! Account handlers: login, profile updates, password changes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, VendorId};
use crate::domain::vendor::{Vendor, VendorProfile, MIN_PASSWORD_LENGTH};
use crate::ports::{
    AdminRepository, PasswordHasher, Role, TokenIssuer, VendorRepository,
};

fn invalid_credentials() -> DomainError {
    // Same message for unknown email and wrong password, so responses
    // cannot be used to probe which emails exist.
    DomainError::new(ErrorCode::Unauthorized, "Invalid email or password")
}

/// Command to log a vendor in.
#[derive(Debug, Clone)]
pub struct VendorLoginCommand {
    pub email: String,
    pub password: String,
}

/// Successful login: the session token and the authenticated vendor.
#[derive(Debug)]
pub struct VendorLoginResult {
    pub token: String,
    pub vendor: Vendor,
}

/// Handles vendor login.
pub struct VendorLoginHandler {
    vendors: Arc<dyn VendorRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl VendorLoginHandler {
    pub fn new(
        vendors: Arc<dyn VendorRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            vendors,
            hasher,
            tokens,
        }
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Password failures return `Unauthorized` regardless of account
    /// status; only a correct password on a non-active account surfaces
    /// `AccountNotActive`.
    pub async fn handle(&self, cmd: VendorLoginCommand) -> Result<VendorLoginResult, DomainError> {
        let vendor = self
            .vendors
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(&cmd.password, &vendor.password_hash)? {
            return Err(invalid_credentials());
        }

        if !vendor.status.can_authenticate() {
            return Err(DomainError::new(
                ErrorCode::AccountNotActive,
                format!("Vendor account is {}", vendor.status),
            ));
        }

        let token = self.tokens.issue(&vendor.id.to_string(), Role::Vendor)?;
        tracing::info!(vendor_id = %vendor.id, "vendor logged in");
        Ok(VendorLoginResult { token, vendor })
    }
}

/// Command to log an admin in.
#[derive(Debug, Clone)]
pub struct AdminLoginCommand {
    pub email: String,
    pub password: String,
}

/// Successful admin login.
#[derive(Debug)]
pub struct AdminLoginResult {
    pub token: String,
    pub admin_id: String,
    pub display_name: String,
}

/// Handles admin login.
pub struct AdminLoginHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AdminLoginHandler {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: AdminLoginCommand) -> Result<AdminLoginResult, DomainError> {
        let admin = self
            .admins
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(&cmd.password, &admin.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&admin.id.to_string(), Role::Admin)?;
        tracing::info!(admin_id = %admin.id, "admin logged in");
        Ok(AdminLoginResult {
            token,
            admin_id: admin.id.to_string(),
            display_name: admin.display_name,
        })
    }
}

/// Query for a vendor's own profile.
pub struct GetVendorProfileHandler {
    vendors: Arc<dyn VendorRepository>,
}

impl GetVendorProfileHandler {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self { vendors }
    }

    pub async fn handle(&self, vendor_id: &VendorId) -> Result<Vendor, DomainError> {
        self.vendors
            .find_by_id(vendor_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::VendorNotFound, "Vendor not found"))
    }
}

/// Command to update a vendor's editable profile metadata.
#[derive(Debug, Clone)]
pub struct UpdateVendorProfileCommand {
    pub vendor_id: VendorId,
    pub profile: VendorProfile,
}

/// Handles vendor profile updates.
pub struct UpdateVendorProfileHandler {
    vendors: Arc<dyn VendorRepository>,
}

impl UpdateVendorProfileHandler {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self { vendors }
    }

    pub async fn handle(&self, cmd: UpdateVendorProfileCommand) -> Result<Vendor, DomainError> {
        let mut vendor = self
            .vendors
            .find_by_id(&cmd.vendor_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::VendorNotFound, "Vendor not found"))?;

        vendor.update_profile(cmd.profile);
        self.vendors.update(&vendor).await?;
        Ok(vendor)
    }
}

/// Command to change a vendor's password.
#[derive(Debug, Clone)]
pub struct ChangeVendorPasswordCommand {
    pub vendor_id: VendorId,
    pub current_password: String,
    pub new_password: String,
}

/// Handles vendor password changes.
pub struct ChangeVendorPasswordHandler {
    vendors: Arc<dyn VendorRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangeVendorPasswordHandler {
    pub fn new(vendors: Arc<dyn VendorRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { vendors, hasher }
    }

    pub async fn handle(&self, cmd: ChangeVendorPasswordCommand) -> Result<(), DomainError> {
        if cmd.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "new_password",
                format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }

        let mut vendor = self
            .vendors
            .find_by_id(&cmd.vendor_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::VendorNotFound, "Vendor not found"))?;

        if !self
            .hasher
            .verify(&cmd.current_password, &vendor.password_hash)?
        {
            return Err(DomainError::new(
                ErrorCode::Unauthorized,
                "Current password is incorrect",
            ));
        }

        let new_hash = self.hasher.hash(&cmd.new_password)?;
        vendor.set_password_hash(new_hash);
        self.vendors.update(&vendor).await?;
        tracing::info!(vendor_id = %vendor.id, "vendor password changed");
        Ok(())
    }
}
