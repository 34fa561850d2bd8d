use crate::messages::internal_messages::{
    AskFocus, ShowCandidates, ShowOutcome, ShowPlace, ShowTrips,
};
use crate::render;
use actix::prelude::*;
use colored::*;
use common::logger::Logger;
use common::types::dtos::DiscoveryOutcome;
use common::types::place::Place;
use std::io::{self, BufRead, Write};

/// The `UIHandler` actor is the terminal side of the planner: it prints
/// results and reads the user's choices from standard input.
pub struct UIHandler {
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(logger: Logger) -> Self {
        UIHandler { logger }
    }

    fn print_places(&self, places: &[Place]) {
        for (index, place) in places.iter().enumerate() {
            println!(
                "{}",
                render::place_line(index, place).color(place.category.marker_color())
            );
        }
    }

    /// Reads a place number until the input is valid. Empty input, `q` or
    /// end of input mean the user is done.
    fn ask_place(&self, places: &[Place]) -> Option<usize> {
        let stdin = io::stdin();
        loop {
            print!("{}", "Show details for place number (Enter to quit): ".bold());
            if let Err(e) = io::stdout().flush() {
                self.logger.error(format!("Error flushing output: {}", e));
            }

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.logger
                        .error(format!("Error while reading input: {}.", e));
                    return None;
                }
            }

            let choice = input.trim();
            if choice.is_empty() || choice.eq_ignore_ascii_case("q") {
                return None;
            }
            match choice.parse::<usize>() {
                Ok(number) if number >= 1 && number <= places.len() => return Some(number - 1),
                _ => self.logger.warn(format!(
                    "Invalid selection. Enter a number between 1 and {}.",
                    places.len()
                )),
            }
        }
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.debug("UIHandler started.");
    }
}

impl Handler<ShowOutcome> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ShowOutcome, _ctx: &mut Self::Context) {
        let Some(route) = msg.outcome.route() else {
            self.logger.warn("Search was superseded by a newer one.");
            return;
        };
        println!(
            "{} {} -> {}: {}",
            "Route".bold(),
            route.origin,
            route.destination,
            route.summary()
        );

        match &msg.outcome {
            DiscoveryOutcome::Places { places, .. } => {
                for (line, category) in render::legend(&msg.categories)
                    .iter()
                    .zip(&msg.categories)
                {
                    println!("{}", line.color(category.marker_color()));
                }
                if places.is_empty() {
                    self.logger.warn("No places found along the route.");
                } else {
                    self.print_places(places);
                }
            }
            _ => self
                .logger
                .info("No categories selected, showing the route only."),
        }
    }
}

impl Handler<ShowCandidates> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ShowCandidates, _ctx: &mut Self::Context) {
        if msg.candidates.is_empty() {
            self.logger.warn(format!(
                "No {} found around {}.",
                msg.category.label().to_lowercase(),
                msg.location
            ));
            return;
        }
        println!(
            "{}",
            format!("{} around {}", msg.category.label(), msg.location).bold()
        );
        for (index, candidate) in msg.candidates.iter().enumerate() {
            println!(
                "{}",
                render::candidate_line(index, candidate).color(msg.category.marker_color())
            );
        }
    }
}

impl Handler<AskFocus> for UIHandler {
    type Result = Option<String>;

    /// Handles the `AskFocus` message by blocking on standard input until
    /// the user picks a place or quits.
    fn handle(&mut self, msg: AskFocus, _ctx: &mut Self::Context) -> Self::Result {
        if msg.places.is_empty() {
            return None;
        }
        self.ask_place(&msg.places)
            .map(|index| msg.places[index].id.clone())
    }
}

impl Handler<ShowPlace> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ShowPlace, _ctx: &mut Self::Context) {
        let card = render::detail_card(&msg.place);
        let color = msg.place.category.marker_color();
        for (index, line) in card.iter().enumerate() {
            if index == 0 {
                println!("{}", line.bold().color(color));
            } else {
                println!("    {}", line);
            }
        }
    }
}

impl Handler<ShowTrips> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ShowTrips, _ctx: &mut Self::Context) {
        if msg.trips.is_empty() {
            self.logger.info("No trips yet.");
            return;
        }
        for entry in &msg.trips {
            let lines = render::trip_summary(entry);
            if let Some((header, rest)) = lines.split_first() {
                println!("{}", header.bold());
                for line in rest {
                    println!("{}", line);
                }
            }
        }
    }
}
