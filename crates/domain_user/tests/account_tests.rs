//! Account lifecycle tests

use domain_user::{NewUsuario, Rol, UserError, Usuario, UsuarioChanges};

const COST: u32 = 4;

fn register(email: &str, password: &str) -> Result<Usuario, UserError> {
    Usuario::register(
        NewUsuario {
            email: email.to_string(),
            password: password.to_string(),
            nombre: "Administrador".to_string(),
            rol: Rol::Admin,
        },
        COST,
    )
}

#[test]
fn test_register_then_sign_in() {
    let admin = register("Admin@CRM.com", "admin123").unwrap();
    assert_eq!(admin.email, "admin@crm.com");
    assert_eq!(admin.rol, Rol::Admin);
    assert!(admin.check_password("admin123"));
    assert!(!admin.check_password("Admin123"));
}

#[test]
fn test_profile_then_password_change() {
    let mut admin = register("admin@crm.com", "admin123").unwrap();
    admin
        .apply(UsuarioChanges {
            nombre: None,
            email: Some("  JEFE@crm.com".to_string()),
        })
        .unwrap();
    assert_eq!(admin.email, "jefe@crm.com");

    admin.change_password("admin123", "otra-clave", COST).unwrap();
    assert!(admin.check_password("otra-clave"));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        register("", "admin123").unwrap_err().to_string(),
        "Email, contraseña y nombre son requeridos"
    );
    assert_eq!(
        register("admin@crm", "admin123").unwrap_err(),
        UserError::InvalidEmail
    );
    assert_eq!(
        UserError::InvalidCredentials.to_string(),
        "Email o contraseña incorrectos"
    );
}
