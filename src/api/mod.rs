mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    BuyScenario, MarketAssumptions, MonthlyCostBreakdown, RentScenario, Scenario, ScenarioError,
    Verdict, YearlyDataPoint, monthly_costs, project,
};

pub use report::{format_currency, format_percent, render_table};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    name: Option<String>,
    time_horizon: Option<u32>,

    monthly_rent: Option<f64>,
    utilities: Option<f64>,
    renters_insurance: Option<f64>,

    purchase_price: Option<f64>,
    down_payment: Option<f64>,
    down_payment_percent: Option<f64>,
    interest_rate: Option<f64>,
    loan_term: Option<u32>,
    property_tax: Option<f64>,
    maintenance: Option<f64>,
    home_insurance: Option<f64>,

    annual_rent_increase: Option<f64>,
    annual_home_appreciation: Option<f64>,
    annual_investment_return: Option<f64>,
    annual_maintenance_increase: Option<f64>,
    annual_insurance_increase: Option<f64>,
    annual_property_tax_increase: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "rentvsbuy project",
    about = "Year-by-year rent vs buy wealth projection"
)]
struct Cli {
    #[arg(long, default_value = "Default")]
    name: String,
    #[arg(long, default_value_t = 30, help = "Years to simulate (1-50)")]
    time_horizon: u32,
    #[arg(long, default_value_t = 2000.0, help = "Monthly rent")]
    monthly_rent: f64,
    #[arg(
        long,
        default_value_t = 200.0,
        help = "Monthly utilities, paid on both paths"
    )]
    utilities: f64,
    #[arg(long, default_value_t = 30.0, help = "Monthly renter's insurance")]
    renters_insurance: f64,
    #[arg(long, default_value_t = 400000.0)]
    purchase_price: f64,
    #[arg(long, default_value_t = 80000.0)]
    down_payment: f64,
    #[arg(
        long,
        help = "Down payment as a percent of purchase price; overrides --down-payment"
    )]
    down_payment_percent: Option<f64>,
    #[arg(
        long,
        default_value_t = 3.5,
        help = "Annual mortgage interest rate in percent"
    )]
    interest_rate: f64,
    #[arg(long, default_value_t = 30, help = "Loan term in years")]
    loan_term: u32,
    #[arg(long, default_value_t = 4000.0, help = "Annual property tax")]
    property_tax: f64,
    #[arg(long, default_value_t = 300.0, help = "Monthly maintenance")]
    maintenance: f64,
    #[arg(long, default_value_t = 150.0, help = "Monthly home insurance")]
    home_insurance: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Annual rent increase in percent"
    )]
    annual_rent_increase: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        allow_negative_numbers = true,
        help = "Annual home appreciation in percent"
    )]
    annual_home_appreciation: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Annual return on the renter's investments in percent"
    )]
    annual_investment_return: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        allow_negative_numbers = true,
        help = "Annual maintenance cost increase in percent"
    )]
    annual_maintenance_increase: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Annual home insurance increase in percent"
    )]
    annual_insurance_increase: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        allow_negative_numbers = true,
        help = "Annual property tax increase in percent"
    )]
    annual_property_tax_increase: f64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    scenario_name: String,
    time_horizon: u32,
    monthly_mortgage_payment: f64,
    down_payment_percent: f64,
    monthly_costs: MonthlyCostBreakdown,
    break_even_year: Option<u32>,
    verdict: Verdict,
    summary: String,
    years: Vec<YearlyDataPoint>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_scenario(cli: Cli) -> Result<Scenario, ScenarioError> {
    let mut buy = BuyScenario {
        purchase_price: cli.purchase_price,
        down_payment: cli.down_payment,
        interest_rate: cli.interest_rate,
        loan_term: cli.loan_term,
        property_tax: cli.property_tax,
        maintenance: cli.maintenance,
        home_insurance: cli.home_insurance,
    };
    if let Some(percent) = cli.down_payment_percent {
        if !(0.0..=100.0).contains(&percent) {
            return Err(ScenarioError::PercentOutOfRange {
                field: "downPaymentPercent",
                min: 0.0,
                max: 100.0,
            });
        }
        buy.set_down_payment_percent(percent);
    }

    let scenario = Scenario {
        name: cli.name,
        time_horizon: cli.time_horizon,
        rent: RentScenario {
            monthly_rent: cli.monthly_rent,
            utilities: cli.utilities,
            renters_insurance: cli.renters_insurance,
        },
        buy,
        assumptions: MarketAssumptions {
            annual_rent_increase: cli.annual_rent_increase,
            annual_home_appreciation: cli.annual_home_appreciation,
            annual_investment_return: cli.annual_investment_return,
            annual_maintenance_increase: cli.annual_maintenance_increase,
            annual_insurance_increase: cli.annual_insurance_increase,
            annual_property_tax_increase: cli.annual_property_tax_increase,
        },
    };
    scenario.validate()?;
    Ok(scenario)
}

fn build_project_response(scenario: &Scenario) -> ProjectResponse {
    let costs = monthly_costs(scenario);
    let result = project(scenario);
    let verdict = Verdict::from_break_even(result.break_even_year);

    ProjectResponse {
        scenario_name: scenario.name.clone(),
        time_horizon: scenario.time_horizon,
        monthly_mortgage_payment: costs.buy.mortgage_payment,
        down_payment_percent: scenario.buy.down_payment_percent(),
        monthly_costs: costs,
        break_even_year: result.break_even_year,
        verdict,
        summary: verdict.summary(),
        years: result.years,
    }
}

/// Runs one projection from command-line flags and prints it. `args[0]` is
/// taken as the command name. Returns the process exit code.
pub fn run_projection_cli(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };
    let format = cli.format;

    let scenario = match build_scenario(cli) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Invalid scenario: {e}");
            return 2;
        }
    };

    match format {
        OutputFormat::Table => {
            let costs = monthly_costs(&scenario);
            let result = project(&scenario);
            print!("{}", render_table(&scenario, &costs, &result));
        }
        OutputFormat::Json => {
            let response = build_project_response(&scenario);
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Failed to serialize projection: {e}");
                    return 1;
                }
            }
        }
    }
    0
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/defaults", get(defaults_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Rent vs buy HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, Scenario::default())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let scenario = match scenario_from_payload(payload) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::warn!("rejected projection request: {e}");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    log::debug!(
        "projecting '{}' over {} years",
        scenario.name,
        scenario.time_horizon
    );
    json_response(StatusCode::OK, build_project_response(&scenario))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn scenario_from_json(json: &str) -> Result<Scenario, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    scenario_from_payload(payload).map_err(|e| e.to_string())
}

fn scenario_from_payload(payload: ProjectPayload) -> Result<Scenario, ScenarioError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.name {
        cli.name = v;
    }
    if let Some(v) = payload.time_horizon {
        cli.time_horizon = v;
    }

    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.utilities {
        cli.utilities = v;
    }
    if let Some(v) = payload.renters_insurance {
        cli.renters_insurance = v;
    }

    if let Some(v) = payload.purchase_price {
        cli.purchase_price = v;
    }
    if let Some(v) = payload.down_payment {
        cli.down_payment = v;
    }
    if let Some(v) = payload.down_payment_percent {
        cli.down_payment_percent = Some(v);
    }
    if let Some(v) = payload.interest_rate {
        cli.interest_rate = v;
    }
    if let Some(v) = payload.loan_term {
        cli.loan_term = v;
    }
    if let Some(v) = payload.property_tax {
        cli.property_tax = v;
    }
    if let Some(v) = payload.maintenance {
        cli.maintenance = v;
    }
    if let Some(v) = payload.home_insurance {
        cli.home_insurance = v;
    }

    if let Some(v) = payload.annual_rent_increase {
        cli.annual_rent_increase = v;
    }
    if let Some(v) = payload.annual_home_appreciation {
        cli.annual_home_appreciation = v;
    }
    if let Some(v) = payload.annual_investment_return {
        cli.annual_investment_return = v;
    }
    if let Some(v) = payload.annual_maintenance_increase {
        cli.annual_maintenance_increase = v;
    }
    if let Some(v) = payload.annual_insurance_increase {
        cli.annual_insurance_increase = v;
    }
    if let Some(v) = payload.annual_property_tax_increase {
        cli.annual_property_tax_increase = v;
    }

    build_scenario(cli)
}

fn default_cli_for_api() -> Cli {
    let defaults = Scenario::default();
    Cli {
        name: defaults.name,
        time_horizon: defaults.time_horizon,
        monthly_rent: defaults.rent.monthly_rent,
        utilities: defaults.rent.utilities,
        renters_insurance: defaults.rent.renters_insurance,
        purchase_price: defaults.buy.purchase_price,
        down_payment: defaults.buy.down_payment,
        down_payment_percent: None,
        interest_rate: defaults.buy.interest_rate,
        loan_term: defaults.buy.loan_term,
        property_tax: defaults.buy.property_tax,
        maintenance: defaults.buy.maintenance,
        home_insurance: defaults.buy.home_insurance,
        annual_rent_increase: defaults.assumptions.annual_rent_increase,
        annual_home_appreciation: defaults.assumptions.annual_home_appreciation,
        annual_investment_return: defaults.assumptions.annual_investment_return,
        annual_maintenance_increase: defaults.assumptions.annual_maintenance_increase,
        annual_insurance_increase: defaults.assumptions.annual_insurance_increase,
        annual_property_tax_increase: defaults.assumptions.annual_property_tax_increase,
        format: OutputFormat::Json,
    }
}
