//! Command-line access to a Salesforce org.
//!
//! Authenticates with the client-credentials flow and runs one operation.
//!
//! ```sh
//! export SF_MY_DOMAIN=acme
//! export SF_CLIENT_ID=3MVG9...
//! export SF_CLIENT_SECRET=...
//! cargo run --bin sforce -- query "SELECT Id, Name FROM Account LIMIT 5"
//! cargo run --bin sforce -- create Account '{"Name":"Acme"}'
//! ```
//!
//! `SF_API_VERSION` overrides the REST API version. Logs go to stderr and are
//! filtered with `RUST_LOG`.

use std::fmt::Display;
use std::io::Write;

use sforce_auth::{ClientCredentials, OAuthClient};
use sforce_client::OrgEndpoint;
use sforce_rest::SalesforceRestClient;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  sforce query \"<soql>\"
  sforce create <Object> '<json object>'

Environment:
  SF_MY_DOMAIN       My Domain subdomain (e.g. acme for acme.my.salesforce.com)
  SF_CLIENT_ID       Connected app consumer key
  SF_CLIENT_SECRET   Connected app consumer secret
  SF_API_VERSION     REST API version (optional, default 61.0)";

enum Command {
    Query { soql: String },
    Create { sobject: String, record: serde_json::Value },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args).unwrap_or_else(|msg| {
        eprintln!("Error: {msg}\n");
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    let endpoint = OrgEndpoint::from_env().unwrap_or_else(|e| fail("invalid org endpoint", e));
    let credentials =
        ClientCredentials::from_env().unwrap_or_else(|e| fail("missing client credentials", e));

    let oauth = OAuthClient::new(endpoint.clone()).unwrap_or_else(|e| fail("HTTP client", e));
    let credential = oauth
        .authenticate(&credentials)
        .await
        .unwrap_or_else(|e| fail("authentication failed", e));

    let mut client = SalesforceRestClient::new(endpoint, &credential)
        .unwrap_or_else(|e| fail("failed to create REST client", e));
    if let Ok(version) = std::env::var("SF_API_VERSION") {
        client = client.with_api_version(version);
    }

    match command {
        Command::Query { soql } => {
            let body = client
                .query_raw(&soql)
                .await
                .unwrap_or_else(|e| fail("query failed", e));
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(&body).and_then(|_| writeln!(stdout)) {
                fail("failed to write output", e);
            }
        }
        Command::Create { sobject, record } => {
            let id = client
                .create(&sobject, &record)
                .await
                .unwrap_or_else(|e| fail("create failed", e));
            println!("{id}");
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args {
        [cmd, soql] if cmd == "query" => Ok(Command::Query { soql: soql.clone() }),
        [cmd, sobject, json] if cmd == "create" => {
            let record: serde_json::Value =
                serde_json::from_str(json).map_err(|e| format!("record is not valid JSON: {e}"))?;
            if !record.is_object() {
                return Err("record must be a JSON object".to_string());
            }
            Ok(Command::Create {
                sobject: sobject.clone(),
                record,
            })
        }
        [] => Err("no command given".to_string()),
        [cmd, ..] => Err(format!("unrecognized arguments for '{cmd}'")),
    }
}

fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("Error: {context}: {err}");
    std::process::exit(1);
}
