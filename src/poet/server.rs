//! HTTP server components for scansion.
//!
//! A thin presentation layer: every handler hands its input to the analysis pipeline and returns
//! the results as JSON without changing them.

use rocket::form::Form;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{Build, Rocket, State};
use tracing::{info, warn};

use crate::poet::analysis;
use crate::poet::dictionary::PronouncingDictionary;
use crate::poet::error::Error;
use crate::poet::forms::{PoetryForm, PoetryFormCatalogue};
use crate::poet::snippet::normalize_token;

/// Data owned by the web server and shared, read-only, by all requests.
pub struct ServerState {
    pub dict: PronouncingDictionary,
    pub forms: PoetryFormCatalogue,
}

/// A poetry form as JSON.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct FormResponse {
    name: String,
    syllables: Vec<u32>,
    rhyme_tags: Vec<String>,
}

impl FormResponse {
    fn new(name: &str, form: &PoetryForm) -> FormResponse {
        FormResponse {
            name: name.to_string(),
            syllables: form.syllables().to_vec(),
            rhyme_tags: form.rhyme_tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct LookupResponse {
    query: String,
    /// The query after normalization; this is what was looked up.
    word: String,
    phonemes: Option<Vec<String>>,
    syllables: Option<usize>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct AnalysisResponse {
    lines: Vec<Vec<String>>,
    pronunciation: String,
    rhyme_scheme: Vec<String>,
    syllables: Vec<usize>,
    form: Option<FormResponse>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct ErrorResponse {
    error: String,
    unknown_word: Option<String>,
}

type ApiError = status::Custom<Json<ErrorResponse>>;

fn api_error(status: Status, error: String, unknown_word: Option<String>) -> ApiError {
    status::Custom(
        status,
        Json(ErrorResponse {
            error,
            unknown_word,
        }),
    )
}

impl From<Error> for ApiError {
    fn from(e: Error) -> ApiError {
        let message = e.to_string();
        match e {
            Error::UnknownWord(word) => api_error(Status::UnprocessableEntity, message, Some(word)),
            Error::PreconditionViolation { .. } | Error::TooManyRimes { .. } => {
                api_error(Status::UnprocessableEntity, message, None)
            }
            Error::MalformedEntry { .. } | Error::Io { .. } => {
                api_error(Status::InternalServerError, message, None)
            }
        }
    }
}

/// Handler for the root (/) page.
#[get("/")]
fn index() -> &'static str {
    "scansion: poem meter analysis\n\
     \n\
     GET  /forms           list the known poetry forms\n\
     GET  /forms/<name>    one poetry form\n\
     GET  /lookup?term=    the pronunciation of a single word\n\
     POST /analyze         form fields: text (the poem), form (optional form name)\n"
}

/// Handler listing every poetry form.
#[get("/forms")]
fn list_forms(state: &State<ServerState>) -> Json<Vec<FormResponse>> {
    Json(
        state
            .forms
            .iter()
            .map(|(name, form)| FormResponse::new(name, form))
            .collect(),
    )
}

/// Handler for a single poetry form. Unknown names are a 404.
#[get("/forms/<name>")]
fn get_form(state: &State<ServerState>, name: &str) -> Option<Json<FormResponse>> {
    state
        .forms
        .get(name)
        .map(|form| Json(FormResponse::new(name, form)))
}

/// Handler for querying the dictionary for a single term.
#[get("/lookup?<term>")]
fn lookup(state: &State<ServerState>, term: &str) -> Json<LookupResponse> {
    let word = normalize_token(term);
    let entry = state.dict.lookup(&word);
    Json(LookupResponse {
        query: term.to_string(),
        phonemes: entry.map(|e| e.phonemes.clone()),
        syllables: entry.map(|e| e.syllables()),
        word,
    })
}

/// Describes the parameters and types for /analyze POST requests.
#[derive(FromForm)]
struct AnalyzeRequest {
    /// The poem to analyze.
    text: String,
    /// A poetry form to return alongside the analysis, by name.
    form: Option<String>,
}

/// Handler for a POST form to analyze a poem.
#[post("/analyze", data = "<req>")]
fn analyze(
    state: &State<ServerState>,
    req: Form<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let form = match &req.form {
        Some(name) => match state.forms.get(name) {
            Some(form) => Some(FormResponse::new(name, form)),
            None => {
                return Err(api_error(
                    Status::NotFound,
                    format!("unknown poetry form: {}", name),
                    None,
                ))
            }
        },
        None => None,
    };

    let result = analysis::analyze(&req.text, &state.dict).map_err(|e| {
        warn!(error = %e, "analysis failed");
        ApiError::from(e)
    })?;
    Ok(Json(AnalysisResponse {
        pronunciation: result.pronunciation_text(),
        rhyme_scheme: result.rhyme_scheme.iter().map(|c| c.to_string()).collect(),
        lines: result.lines,
        syllables: result.syllables,
        form,
    }))
}

/// Assembles the Rocket instance with all routes mounted, ready to launch (or to test).
pub fn build(state: ServerState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes![index, list_forms, get_form, lookup, analyze])
}

/// Starts the Rocket HTTP server and awaits until the server shuts down.
///
/// Args:
///
/// * `state` - The already-loaded dictionary and forms to use when handling all requests.
pub async fn run(state: ServerState) -> Result<(), rocket::Error> {
    info!(
        words = state.dict.len(),
        forms = state.forms.len(),
        "launching web server; type Control-C to stop it"
    );
    build(state).launch().await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::ContentType;
    use rocket::local::blocking::{Client, LocalResponse};
    use rocket::serde::json::Value;

    fn client() -> Client {
        let dict = PronouncingDictionary::parse(
            ";;; Test words.\nYES Y EH1 S\nNO N OW1\nGO G OW1\nHMM HH M\n",
        )
        .unwrap();
        let forms = PoetryFormCatalogue::parse("Couplet\n1 A\n2 A\n\nHaiku\n5 *\n7 *\n5 *\n").unwrap();
        Client::tracked(build(ServerState { dict, forms })).expect("valid rocket instance")
    }

    fn post_analyze<'c>(client: &'c Client, body: &str) -> LocalResponse<'c> {
        client
            .post("/analyze")
            .header(ContentType::Form)
            .body(body.to_string())
            .dispatch()
    }

    #[test]
    fn test_index() {
        let client = client();
        let response = client.get("/").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("/analyze"));
    }

    #[test]
    fn test_list_forms() {
        let client = client();
        let response = client.get("/forms").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let value: Value = response.into_json().unwrap();
        assert_eq!(value[0]["name"], "Couplet");
        assert_eq!(value[1]["name"], "Haiku");
        assert_eq!(value[1]["syllables"][1], 7);
        assert_eq!(value[1]["rhyme_tags"][0], "*");
    }

    #[test]
    fn test_get_form() {
        let client = client();
        let value: Value = client.get("/forms/Couplet").dispatch().into_json().unwrap();
        assert_eq!(value["rhyme_tags"][1], "A");
        assert_eq!(client.get("/forms/Sonnet").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn test_lookup() {
        let client = client();
        let value: Value = client.get("/lookup?term=Yes!").dispatch().into_json().unwrap();
        assert_eq!(value["word"], "YES");
        assert_eq!(value["phonemes"][1], "EH1");
        assert_eq!(value["syllables"], 1);

        let value: Value = client.get("/lookup?term=maybe").dispatch().into_json().unwrap();
        assert!(value["phonemes"].is_null());
    }

    #[test]
    fn test_analyze() {
        let client = client();
        let response = post_analyze(&client, "text=No%2C+yes%0Ago%21&form=Couplet");
        assert_eq!(response.status(), Status::Ok);
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["lines"][0][1], "YES");
        assert_eq!(value["pronunciation"], "N OW1 | Y EH1 S\nG OW1");
        assert_eq!(value["rhyme_scheme"][0], "A");
        assert_eq!(value["rhyme_scheme"][1], "B");
        assert_eq!(value["syllables"][0], 2);
        assert_eq!(value["form"]["name"], "Couplet");
    }

    #[test]
    fn test_analyze_unknown_word() {
        let client = client();
        let response = post_analyze(&client, "text=yes+maybe");
        assert_eq!(response.status(), Status::UnprocessableEntity);
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["unknown_word"], "MAYBE");
    }

    #[test]
    fn test_analyze_line_without_rime() {
        let client = client();
        let response = post_analyze(&client, "text=yes+hmm");
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[test]
    fn test_analyze_unknown_form() {
        let client = client();
        let response = post_analyze(&client, "text=yes&form=Sonnet");
        assert_eq!(response.status(), Status::NotFound);
    }
} // mod tests
