//! Besitzpruefung fuer Ressourcen mit Eigentuemer

use marktplatz_core::KontoId;

use crate::error::{AuthError, AuthResult};

/// Erlaubt die Aktion nur, wenn das handelnde Konto der Eigentuemer ist
///
/// Es gibt keine Ausnahme fuer Administratoren.
pub fn besitz_pruefen(handelnder: KontoId, eigentuemer: KontoId) -> AuthResult<()> {
    if handelnder == eigentuemer {
        Ok(())
    } else {
        tracing::debug!(
            handelnder = %handelnder,
            eigentuemer = %eigentuemer,
            "Zugriff auf fremde Ressource verweigert"
        );
        Err(AuthError::KeineBerechtigung)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eigentuemer_darf() {
        let a = KontoId::new();
        assert!(besitz_pruefen(a, a).is_ok());
    }

    #[test]
    fn fremder_darf_nicht() {
        let a = KontoId::new();
        let b = KontoId::new();
        assert!(matches!(
            besitz_pruefen(a, b),
            Err(AuthError::KeineBerechtigung)
        ));
        assert!(matches!(
            besitz_pruefen(b, a),
            Err(AuthError::KeineBerechtigung)
        ));
    }
}
