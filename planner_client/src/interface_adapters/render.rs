use crate::domain::{Budget, Hotel, Itinerary, View};
use crate::use_cases::ActionState;
use crate::use_cases::App;
use crate::use_cases::auth_forms::{LoginView, SignupView};
use crate::use_cases::dashboard::DashboardView;
use crate::use_cases::hotels::HotelsView;
use crate::use_cases::planner::PlannerView;

const LUXURY_IMAGE: &str =
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=800&q=80";
const RESORT_IMAGE: &str =
    "https://images.unsplash.com/photo-1582719508461-905c673771fd?auto=format&fit=crop&w=800&q=80";
const CITY_IMAGE: &str =
    "https://images.unsplash.com/photo-1590073242678-cfea53377bab?auto=format&fit=crop&w=800&q=80";
const BOUTIQUE_IMAGE: &str =
    "https://images.unsplash.com/photo-1578683010236-d716f9a3f461?auto=format&fit=crop&w=800&q=80";

// Plain-text rendering of the page on screen.

pub fn render(app: &App) -> String {
    let signed_in = app.ctx.session.is_signed_in();
    let view = app.current();
    let mut lines = vec![
        nav_menu(signed_in),
        format!("-- {} ({}) --", view.title(), view.path()),
        String::new(),
    ];

    let body = match view {
        View::Home => home(),
        View::Login => login(&app.login),
        View::Signup => signup(&app.signup),
        View::Planner => planner(&app.planner),
        View::Hotels => hotels(&app.hotels),
        View::Dashboard => dashboard(&app.dashboard),
    };
    lines.extend(body);
    lines.join("\n")
}

pub fn nav_menu(signed_in: bool) -> String {
    let entries: &[&str] = if signed_in {
        &["Home (/)", "Plan Trip (/planner)", "Hotels (/hotels)", "Dashboard (/dashboard)", "Logout"]
    } else {
        &["Home (/)", "Login (/login)", "Signup (/signup)"]
    };
    format!("TripPlanner | {}", entries.join(" | "))
}

/// One paragraph per newline-delimited segment, blank segments included.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Image for a hotel category; unknown or missing categories use the default.
pub fn hotel_image(category: Option<&str>) -> &'static str {
    match category.map(str::to_ascii_lowercase).as_deref() {
        Some("luxury") => LUXURY_IMAGE,
        Some("resort") => RESORT_IMAGE,
        Some("city") => CITY_IMAGE,
        Some("boutique") => BOUTIQUE_IMAGE,
        _ => LUXURY_IMAGE,
    }
}

pub fn day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

fn error_line(error: Option<&str>) -> Option<String> {
    error.map(|message| format!("Error: {message}"))
}

// Progress or failure of a secondary action such as booking or deleting.
fn action_line(state: &ActionState, in_progress: &str) -> Option<String> {
    match state {
        ActionState::Loading => Some(in_progress.to_string()),
        ActionState::Error(message) => Some(format!("Error: {message}")),
        ActionState::Idle | ActionState::Success => None,
    }
}

fn home() -> Vec<String> {
    vec![
        "Discover Your Next Adventure".to_string(),
        "Plan your perfect trip with our AI-powered itinerary generator.".to_string(),
        "Personalized recommendations, optimized routes, and budget estimates.".to_string(),
        String::new(),
        "Start planning: open /planner".to_string(),
    ]
}

fn login(view: &LoginView) -> Vec<String> {
    let mut lines = vec!["Login".to_string()];
    lines.extend(error_line(view.error()));
    lines.push("Usage: login <email> <password>".to_string());
    lines
}

fn signup(view: &SignupView) -> Vec<String> {
    let mut lines = vec!["Sign Up".to_string()];
    lines.extend(error_line(view.error()));
    lines.push("Usage: signup <email> <password>".to_string());
    lines
}

fn planner(view: &PlannerView) -> Vec<String> {
    let mut lines = vec!["Plan Your Trip".to_string()];
    lines.push(format!(
        "City: {} | Interests: {} | Days: {}",
        view.city, view.interests, view.days
    ));

    if *view.generate_state() == ActionState::Loading {
        lines.push("Crafting your perfect itinerary...".to_string());
        return lines;
    }
    let Some(plan) = view.plan() else {
        lines.push("Usage: plan <city> | <interests> | <days>".to_string());
        return lines;
    };

    lines.push(String::new());
    lines.push(format!("Your Trip to {}", view.city));
    lines.push("Itinerary".to_string());
    lines.extend(paragraphs(&plan.itinerary).into_iter().map(str::to_string));
    if !plan.recommendations.is_empty() {
        lines.push("Extra Recommendations".to_string());
        lines.extend(paragraphs(&plan.recommendations).into_iter().map(str::to_string));
    }
    if let Some(budget) = &plan.budget {
        lines.extend(budget_lines(budget));
    }
    lines.push(String::new());
    lines.push("Actions: save | hotels".to_string());
    lines
}

fn hotels(view: &HotelsView) -> Vec<String> {
    let mut lines = vec![
        "Find Your Perfect Stay".to_string(),
        "Discover top-rated hotels and resorts for your next adventure".to_string(),
    ];
    let query = &view.query;
    let date = |value: Option<chrono::NaiveDate>| {
        value.map_or_else(|| "-".to_string(), |date| date.to_string())
    };
    lines.push(format!(
        "City: {} | Check-in: {} | Check-out: {} | Guests: {}",
        query.city,
        date(query.check_in),
        date(query.check_out),
        query.guests
    ));

    if *view.search_state() == ActionState::Loading {
        lines.push("Finding the best deals for you...".to_string());
        return lines;
    }
    lines.extend(error_line(view.error()));
    lines.extend(action_line(view.booking_state(), "Processing your booking..."));
    for hotel in view.hotels() {
        lines.push(String::new());
        lines.extend(hotel_card(hotel));
    }
    lines
}

fn hotel_card(hotel: &Hotel) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {} ★ {}  ${}/night", hotel.id, hotel.name, hotel.rating, hotel.price),
        format!("  {}", hotel.address),
    ];
    if !hotel.amenities.is_empty() {
        lines.push(format!("  Amenities: {}", hotel.amenities.join(", ")));
    }
    if !hotel.description.is_empty() {
        lines.push(format!("  {}", hotel.description));
    }
    lines.push(format!("  Image: {}", hotel_image(hotel.image.as_deref())));
    lines
}

fn dashboard(view: &DashboardView) -> Vec<String> {
    if *view.fetch_state() == ActionState::Loading {
        return vec!["Loading your itineraries...".to_string()];
    }
    if let Some(error) = error_line(view.error()) {
        return vec![error];
    }

    let mut lines = vec!["Your Saved Itineraries".to_string()];
    lines.extend(action_line(view.delete_state(), "Deleting itinerary..."));
    if view.itineraries().is_empty() {
        lines.push("You haven't saved any itineraries yet.".to_string());
        lines.push("Plan a trip to get started!".to_string());
    }
    for itinerary in view.itineraries() {
        lines.push(String::new());
        lines.push(format!("[{}] {}", itinerary.id, itinerary.title));
        lines.push(format!("  {} · {}", itinerary.city, day_count(itinerary.days)));
        if let Some(created_at) = &itinerary.created_at {
            lines.push(format!("  Saved {created_at}"));
        }
    }
    if let Some(selected) = view.selected() {
        lines.push(String::new());
        lines.extend(detail(selected));
    }
    lines
}

fn detail(itinerary: &Itinerary) -> Vec<String> {
    let mut lines = vec![
        format!("== {} ==", itinerary.title),
        format!("Destination: {}", itinerary.city),
        format!("Duration: {}", day_count(itinerary.days)),
    ];
    if let Some(interests) = itinerary.interests.as_ref().filter(|list| !list.is_empty()) {
        lines.push(format!("Interests: {}", interests.join(", ")));
    }
    lines.push("Itinerary".to_string());
    lines.extend(paragraphs(&itinerary.itinerary).into_iter().map(str::to_string));
    if let Some(recommendations) = itinerary
        .recommendations
        .as_deref()
        .filter(|text| !text.is_empty())
    {
        lines.push("Recommendations".to_string());
        lines.extend(paragraphs(recommendations).into_iter().map(str::to_string));
    }
    if let Some(budget) = &itinerary.budget {
        lines.extend(budget_lines(budget));
    }
    lines.push("Actions: close | delete <id> | book-hotels <id>".to_string());
    lines
}

fn budget_lines(budget: &Budget) -> Vec<String> {
    vec![
        "Estimated Budget".to_string(),
        format!("Flights: ${}", budget.flights),
        format!("Accommodation: ${}", budget.accommodation),
        format!("Food: ${}", budget.food),
        format!("Total: ${}", budget.total),
    ]
}
