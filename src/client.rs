use std::fmt::Debug;

use failure::Error;
use url::Url;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use reqwest;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::messages::{
    AdminRegistration, AssignmentKind, AssignmentPayload, AssignmentRecord, AssignmentSummary,
    Component, ComponentRegistration, Equipment, EquipmentPayload, LoginRequest, LoginResponse,
    SecurityEquipment, SecurityEquipmentPayload, User, UserPayload,
};
use crate::session::{Session, SessionError};

#[derive(Fail, Debug, PartialEq)]
pub enum ClientError {
    #[fail(display = "Username or password was incorrect")]
    InvalidLogin,
    #[fail(display = "Server returned {}: {}", status, body)]
    Status { status: u16, body: String },
    #[fail(display = "Unexpected response shape: {}", _0)]
    UnexpectedResponse(String),
}

/// Everything the panel needs from the inventory service. `InventoryClient` is the real
/// implementation; the form machinery only ever sees this trait.
pub trait InventoryApi: Send + Sync {
    fn users(&self) -> Result<Vec<User>, Error>;
    fn equipment(&self) -> Result<Vec<Equipment>, Error>;
    fn components(&self) -> Result<Vec<Component>, Error>;
    fn security_equipment(&self) -> Result<Vec<SecurityEquipment>, Error>;

    fn assignment(&self, id: i64) -> Result<AssignmentRecord, Error>;
    fn create_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error>;
    fn update_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error>;

    fn assignments(&self) -> Result<Vec<AssignmentSummary>, Error>;
    fn assignments_of_kind(&self, kind: AssignmentKind) -> Result<Vec<AssignmentSummary>, Error>;
    fn delete_assignment(&self, id: i64) -> Result<(), Error>;

    fn user(&self, id: i64) -> Result<User, Error>;
    fn create_user(&self, payload: &UserPayload) -> Result<(), Error>;
    fn update_user(&self, payload: &UserPayload) -> Result<(), Error>;
    fn delete_user(&self, id: i64) -> Result<(), Error>;

    fn create_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error>;
    fn update_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error>;
    fn delete_equipment(&self, id: i64) -> Result<(), Error>;

    fn create_component(&self, payload: &ComponentRegistration) -> Result<(), Error>;
    fn create_security_equipment(&self, payload: &SecurityEquipmentPayload) -> Result<(), Error>;
}

/// A client to the inventory REST service
#[derive(Debug)]
pub struct InventoryClient {
    base: Url,
    client: reqwest::Client,
    session: Option<Session>,
}

impl InventoryClient {
    #[allow(clippy::collapsible_if)]
    pub fn new(base: &str) -> Result<Self, Error> {
        let base = Url::parse(base)?;

        if !cfg!(debug_assertions) {
            if base.scheme() != "https" {
                return Err(format_err!("Non https urls not allowed in release builds"));
            }
        }

        Ok(InventoryClient {
            base,
            client: reqwest::Client::new(),
            session: None,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        let endpoint = self.endpoint("Administrador/Login");
        let headers = self.json_content_type(HeaderMap::new());

        let payload = LoginRequest {
            usuario: username.into(),
            password: password.into(),
        };

        let mut resp = self
            .client
            .post(endpoint)
            .body(serde_json::to_string(&payload)?)
            .headers(headers)
            .send()?;

        let status = resp.status();
        if status.is_server_error() {
            Err(ClientError::Status {
                status: status.as_u16(),
                body: resp.text()?,
            })?;
        }
        if !status.is_success() {
            warn!("login refused with {}", status);
            Err(ClientError::InvalidLogin)?;
        }

        let login: LoginResponse = resp.json()?;
        if login.token.is_empty() {
            Err(ClientError::InvalidLogin)?;
        }
        Ok(login)
    }

    /// Create a new administrator account. Like `login` this doesn't need a session.
    pub fn register_admin(&self, registration: &AdminRegistration) -> Result<(), Error> {
        let endpoint = self.endpoint("Administrador/Registrarse");
        debug!("POST {} {:?}", &endpoint, registration);
        let headers = self.json_content_type(HeaderMap::new());

        let resp = self
            .client
            .post(endpoint)
            .body(serde_json::to_string(registration)?)
            .headers(headers)
            .send()?;
        check_status(resp)?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut endpoint = self.base.clone();
        let joined = format!("{}/{}", self.base.path().trim_end_matches('/'), path);
        endpoint.set_path(&joined);
        endpoint
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.get_url(self.endpoint(path))
    }

    fn get_url<T: DeserializeOwned>(&self, endpoint: Url) -> Result<T, Error> {
        debug!("GET {}", &endpoint);
        let headers = self.add_authorization(HeaderMap::new())?;

        let resp = self.client.get(endpoint).headers(headers).send()?;
        let mut resp = check_status(resp)?;
        Ok(resp.json()?)
    }

    fn send<P: Serialize + Debug>(&self, method: reqwest::Method, path: &str, payload: &P) -> Result<(), Error> {
        let endpoint = self.endpoint(path);
        debug!("{} {} {:?}", &method, &endpoint, payload);
        let headers = self.json_content_type(self.add_authorization(HeaderMap::new())?);

        let resp = self
            .client
            .request(method, endpoint)
            .body(serde_json::to_string(payload)?)
            .headers(headers)
            .send()?;
        check_status(resp)?;
        Ok(())
    }

    fn post<P: Serialize + Debug>(&self, path: &str, payload: &P) -> Result<(), Error> {
        self.send(reqwest::Method::POST, path, payload)
    }

    fn put<P: Serialize + Debug>(&self, path: &str, payload: &P) -> Result<(), Error> {
        self.send(reqwest::Method::PUT, path, payload)
    }

    fn delete(&self, path: &str) -> Result<(), Error> {
        let endpoint = self.endpoint(path);
        debug!("DELETE {}", &endpoint);
        let headers = self.add_authorization(HeaderMap::new())?;

        let resp = self.client.delete(endpoint).headers(headers).send()?;
        check_status(resp)?;
        Ok(())
    }

    fn kind_endpoint(&self, kind: AssignmentKind) -> Url {
        let mut endpoint = self.endpoint("Asignaciones/ConsultarAsignaciones");
        endpoint.query_pairs_mut().append_pair("tipo", kind.as_param());
        endpoint
    }

    fn add_authorization(&self, mut headers: HeaderMap) -> Result<HeaderMap, Error> {
        match &self.session {
            Some(session) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    HeaderValue::from_str(&session.token.as_authorization_header())?,
                );
                Ok(headers)
            }
            // Never let a request go out without a token
            None => Err(SessionError::NotAuthenticated)?,
        }
    }

    fn json_content_type(&self, mut headers: HeaderMap) -> HeaderMap {
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("*/*"));
        headers
    }
}

fn check_status(mut resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })?;
    }
    Ok(resp)
}

/// The listing endpoint has been seen answering with both a bare array and an object keyed by
/// id. Accept either.
fn rows_from_value<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, Error> {
    match value {
        Value::Array(rows) => rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(Error::from))
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .map(|(_, row)| serde_json::from_value(row).map_err(Error::from))
            .collect(),
        other => Err(ClientError::UnexpectedResponse(format!("{}", other)))?,
    }
}

impl InventoryApi for InventoryClient {
    fn users(&self) -> Result<Vec<User>, Error> {
        self.get("usuarios/ConsultarUsuarios")
    }

    fn equipment(&self) -> Result<Vec<Equipment>, Error> {
        self.get("equipos/ConsultarEquipos")
    }

    fn components(&self) -> Result<Vec<Component>, Error> {
        self.get("Componentes/ConsultarComponentes")
    }

    fn security_equipment(&self) -> Result<Vec<SecurityEquipment>, Error> {
        self.get("equiposSeguridad/ConsultarEquiposSeguridad")
    }

    fn assignment(&self, id: i64) -> Result<AssignmentRecord, Error> {
        self.get(&format!("Asignaciones/ConsultarAsignacionId/{}", id))
    }

    fn create_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.post("Asignaciones/RegistrarAsignacion", payload)
    }

    fn update_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.post("Asignaciones/ActualizarAsignacion", payload)
    }

    fn assignments(&self) -> Result<Vec<AssignmentSummary>, Error> {
        let value: Value = self.get("Asignaciones/ConsultarAsignacionesCompletas")?;
        rows_from_value(value)
    }

    fn assignments_of_kind(&self, kind: AssignmentKind) -> Result<Vec<AssignmentSummary>, Error> {
        let value: Value = self.get_url(self.kind_endpoint(kind))?;
        rows_from_value(value)
    }

    fn delete_assignment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("Asignaciones/EliminarAsignacion/{}", id))
    }

    fn user(&self, id: i64) -> Result<User, Error> {
        self.get(&format!("usuarios/ConsultarUsuarioPorId/{}", id))
    }

    fn create_user(&self, payload: &UserPayload) -> Result<(), Error> {
        self.post("usuarios/RegistrarUsuario", payload)
    }

    fn update_user(&self, payload: &UserPayload) -> Result<(), Error> {
        self.put("usuarios/ActualizarUsuario", payload)
    }

    fn delete_user(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("usuarios/EliminarUsuario/{}", id))
    }

    fn create_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error> {
        self.post("equipos/RegistrarEquipo", payload)
    }

    fn update_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error> {
        self.put("equipos/ActualizarEquipo", payload)
    }

    fn delete_equipment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("equipos/EliminarEquipo/{}", id))
    }

    fn create_component(&self, payload: &ComponentRegistration) -> Result<(), Error> {
        self.post("Componentes/RegistrarComponente", payload)
    }

    fn create_security_equipment(&self, payload: &SecurityEquipmentPayload) -> Result<(), Error> {
        self.post("EquiposSeguridad/RegistrarEquipoSeguridad", payload)
    }
}
