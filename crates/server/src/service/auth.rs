use async_trait::async_trait;
use shared::{
    abstract_trait::{
        AuthServiceTrait, DynEmailService, DynHashing, DynJwtService, DynUserRepository,
    },
    domain::{
        requests::{AuthRequest, ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest},
        responses::{ApiResponse, LoginResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::EmailTemplateData,
};
use tracing::{error, info};

pub struct AuthService {
    repository: DynUserRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
    email: DynEmailService,
    client_url: String,
}

impl AuthService {
    pub fn new(
        repository: DynUserRepository,
        hashing: DynHashing,
        jwt: DynJwtService,
        email: DynEmailService,
        client_url: String,
    ) -> Self {
        Self {
            repository,
            hashing,
            jwt,
            email,
            client_url,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register_user(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        if request.password != request.confirm_password {
            return Err(ServiceError::Validation(vec![
                "Passwords do not match".to_string(),
            ]));
        }

        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(RepositoryError::AlreadyExists("Email already exists".to_string()).into());
        }

        let hashed_password = self.hashing.hash_password(&request.password).await?;

        let user = self
            .repository
            .create_user(request, &hashed_password)
            .await?;

        let welcome = EmailTemplateData {
            title: "Welcome to Fast Discount".to_string(),
            message: format!(
                "Hi {}, your account is ready. Grab discounted products before they expire!",
                user.name
            ),
            button: "Open Fast Discount".to_string(),
            link: self.client_url.clone(),
        };

        let message = match self
            .email
            .send_email(&user.email, "Welcome to Fast Discount", &welcome)
            .await
        {
            Ok(()) => "User registered successfully",
            Err(e) => {
                error!("❌ Welcome email failed for {}: {e}", user.email);
                "User created, but email sending failed."
            }
        };

        Ok(ApiResponse::success(message, UserResponse::from(user)))
    }

    async fn login_user(
        &self,
        request: &AuthRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Email not found".to_string()))?;

        self.hashing
            .compare_password(&user.password, &request.password)
            .await?;

        let token = self.jwt.generate_token(user.user_id as i64, "access")?;

        info!("✅ User logged in: {}", user.email);

        Ok(ApiResponse::success(
            "Login successful",
            LoginResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }

    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Email not found".to_string()))?;

        let token = self.jwt.generate_token(user.user_id as i64, "reset")?;
        let link = format!("{}/reset-password?token={token}", self.client_url);

        let reset = EmailTemplateData {
            title: "Reset your password".to_string(),
            message: format!(
                "Hi {}, we received a request to reset your password. The link below expires in 15 minutes.",
                user.name
            ),
            button: "Reset Password".to_string(),
            link,
        };

        self.email
            .send_email(&user.email, "Reset your password", &reset)
            .await?;

        Ok(ApiResponse::success("Password reset email sent.", true))
    }

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        if request.new_password != request.confirm_password {
            return Err(ServiceError::Validation(vec![
                "Passwords do not match".to_string(),
            ]));
        }

        let user_id = self.jwt.verify_token(&request.token, "reset")?;

        let hashed_password = self.hashing.hash_password(&request.new_password).await?;

        self.repository
            .update_password(user_id as i32, &hashed_password)
            .await?;

        info!("🔄 Password reset for user {user_id}");

        Ok(ApiResponse::success("Password reset successfully.", true))
    }

    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        Ok(ApiResponse::success(
            "User retrieved successfully",
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex as StdMutex},
    };

    use shared::{
        abstract_trait::{EmailServiceTrait, UserRepositoryTrait},
        config::{Hashing, JwtConfig},
        errors::NotifyError,
        model::User,
    };

    use super::*;

    #[derive(Default)]
    struct FakeUserRepository {
        users: StdMutex<HashMap<i32, User>>,
        next_id: StdMutex<i32>,
    }

    #[async_trait]
    impl UserRepositoryTrait for FakeUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, RepositoryError> {
            Ok(self.users.lock().unwrap().get(&user_id).cloned())
        }

        async fn create_user(
            &self,
            request: &RegisterRequest,
            hashed_password: &str,
        ) -> Result<User, RepositoryError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;

            let user = User {
                user_id: *next_id,
                name: request.name.clone(),
                email: request.email.clone(),
                password: hashed_password.to_string(),
                role: request.role.clone().unwrap_or_else(|| "customer".to_string()),
                created_at: None,
            };

            self.users.lock().unwrap().insert(user.user_id, user.clone());

            Ok(user)
        }

        async fn update_password(
            &self,
            user_id: i32,
            hashed_password: &str,
        ) -> Result<(), RepositoryError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&user_id).ok_or(RepositoryError::NotFound)?;
            user.password = hashed_password.to_string();
            Ok(())
        }
    }

    struct FakeEmailService {
        sent: StdMutex<Vec<(String, String)>>,
        failing: bool,
    }

    impl FakeEmailService {
        fn new(failing: bool) -> Self {
            Self {
                sent: StdMutex::new(Vec::new()),
                failing,
            }
        }
    }

    #[async_trait]
    impl EmailServiceTrait for FakeEmailService {
        async fn send_email(
            &self,
            to: &str,
            subject: &str,
            _data: &EmailTemplateData,
        ) -> Result<(), NotifyError> {
            if self.failing {
                return Err(NotifyError::Smtp("relay unavailable".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    fn service_with(
        failing_email: bool,
    ) -> (AuthService, Arc<FakeUserRepository>, Arc<FakeEmailService>) {
        let repository = Arc::new(FakeUserRepository::default());
        let email = Arc::new(FakeEmailService::new(failing_email));
        let service = AuthService::new(
            repository.clone(),
            Arc::new(Hashing::new()),
            Arc::new(JwtConfig::new("test-secret")),
            email.clone(),
            "http://localhost:3000".to_string(),
        );
        (service, repository, email)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let (service, _repository, email) = service_with(false);

        let registered = service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();
        assert_eq!(registered.message, "User registered successfully");
        assert_eq!(registered.data.role, "customer");
        assert_eq!(email.sent.lock().unwrap().len(), 1);

        let logged_in = service
            .login_user(&AuthRequest {
                email: "ana@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();
        assert!(!logged_in.data.token.is_empty());
        assert_eq!(logged_in.data.user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (service, _repository, _email) = service_with(false);

        service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();

        let err = service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn register_survives_email_outage() {
        let (service, repository, _email) = service_with(true);

        let registered = service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();

        assert_eq!(registered.message, "User created, but email sending failed.");
        assert_eq!(repository.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let (service, _repository, _email) = service_with(false);

        service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();

        let err = service
            .login_user(&AuthRequest {
                email: "ana@example.com".to_string(),
                password: "wrong-pass".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn reset_password_flow_updates_credentials() {
        let (service, _repository, _email) = service_with(false);

        service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();
        service
            .forgot_password(&ForgotPasswordRequest {
                email: "ana@example.com".to_string(),
            })
            .await
            .unwrap();

        let jwt = JwtConfig::new("test-secret");
        let token = shared::abstract_trait::JwtServiceTrait::generate_token(&jwt, 1, "reset")
            .unwrap();

        service
            .reset_password(&ResetPasswordRequest {
                token,
                new_password: "new-hunter22".to_string(),
                confirm_password: "new-hunter22".to_string(),
            })
            .await
            .unwrap();

        let logged_in = service
            .login_user(&AuthRequest {
                email: "ana@example.com".to_string(),
                password: "new-hunter22".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.message, "Login successful");
    }

    #[tokio::test]
    async fn reset_password_rejects_access_token() {
        let (service, _repository, _email) = service_with(false);

        service
            .register_user(&register_request("ana@example.com"))
            .await
            .unwrap();

        let jwt = JwtConfig::new("test-secret");
        let token = shared::abstract_trait::JwtServiceTrait::generate_token(&jwt, 1, "access")
            .unwrap();

        let err = service
            .reset_password(&ResetPasswordRequest {
                token,
                new_password: "new-hunter22".to_string(),
                confirm_password: "new-hunter22".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTokenType));
    }
}
