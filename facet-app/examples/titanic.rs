//! A headless cross-filter dashboard over a small Titanic sample: two pie
//! charts acting as filter controls, two histograms following the filtered
//! records. Interactions are scripted and animations are stepped with a
//! synthetic clock; the recording surface stands in for a renderer.

use facet_app::chart::{DomainSpec, Histogram, PieChart};
use facet_app::controller::CrossFilter;
use facet_app::event::InteractionEvent;
use facet_common::time::{Duration, Instant};
use facet_scene::surface::RecordingSurface;

#[derive(Clone)]
struct Passenger {
    pclass: &'static str,
    sex: &'static str,
    survived: &'static str,
    age: Option<f64>,
    fare: Option<f64>,
}

fn sample() -> Vec<Passenger> {
    vec![
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(22.0), fare: Some(7.25) },
        Passenger { pclass: "1", sex: "female", survived: "yes", age: Some(38.0), fare: Some(71.28) },
        Passenger { pclass: "3", sex: "female", survived: "yes", age: Some(26.0), fare: Some(7.92) },
        Passenger { pclass: "1", sex: "female", survived: "yes", age: Some(35.0), fare: Some(53.1) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(35.0), fare: Some(8.05) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: None, fare: Some(8.46) },
        Passenger { pclass: "1", sex: "male", survived: "no", age: Some(54.0), fare: Some(51.86) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(2.0), fare: Some(21.07) },
        Passenger { pclass: "3", sex: "female", survived: "yes", age: Some(27.0), fare: Some(11.13) },
        Passenger { pclass: "2", sex: "female", survived: "yes", age: Some(14.0), fare: Some(30.07) },
        Passenger { pclass: "3", sex: "female", survived: "yes", age: Some(4.0), fare: Some(16.7) },
        Passenger { pclass: "1", sex: "female", survived: "yes", age: Some(58.0), fare: Some(26.55) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(20.0), fare: Some(8.05) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(39.0), fare: Some(31.27) },
        Passenger { pclass: "3", sex: "female", survived: "no", age: Some(14.0), fare: Some(7.85) },
        Passenger { pclass: "2", sex: "female", survived: "yes", age: Some(55.0), fare: Some(16.0) },
        Passenger { pclass: "3", sex: "male", survived: "no", age: Some(2.0), fare: Some(29.13) },
        Passenger { pclass: "2", sex: "male", survived: "yes", age: None, fare: Some(13.0) },
        Passenger { pclass: "3", sex: "female", survived: "no", age: Some(31.0), fare: Some(18.0) },
        Passenger { pclass: "3", sex: "female", survived: "yes", age: None, fare: Some(7.22) },
    ]
}

fn settle(
    controller: &mut CrossFilter<Passenger>,
    mut now: Instant,
    surface: &mut RecordingSurface,
) -> Instant {
    // 60 fps frames until every transition has landed
    loop {
        now += Duration::from_millis(16);
        if controller.tick(now, surface) == 0 {
            return now;
        }
    }
}

fn report(controller: &CrossFilter<Passenger>, surface: &RecordingSurface) {
    println!(
        "  sex={} survived={} pclass={} | {} records, {} elements",
        controller.selection_label("sex"),
        controller.selection_label("survived"),
        controller.selection_label("pclass"),
        controller.filtered().len(),
        surface.live_ids().len(),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut controller = CrossFilter::new(sample())
        .with_dimension("sex", |p: &Passenger| p.sex.to_string())
        .with_dimension("survived", |p: &Passenger| p.survived.to_string())
        .with_dimension("pclass", |p: &Passenger| p.pclass.to_string());

    controller.add_chart(Box::new(PieChart::new(
        "sex",
        "sex",
        vec!["male".to_string(), "female".to_string()],
        |p: &Passenger| p.sex.to_string(),
    )?));
    controller.add_chart(Box::new(PieChart::new(
        "survived",
        "survived",
        vec!["yes".to_string(), "no".to_string()],
        |p: &Passenger| p.survived.to_string(),
    )?));
    controller.add_chart(Box::new(Histogram::new(
        "age",
        460.0,
        400.0,
        DomainSpec::Fixed(0.0, 100.0),
        10,
        |p: &Passenger| p.age,
    )));
    controller.add_chart(Box::new(Histogram::new(
        "fare",
        460.0,
        400.0,
        DomainSpec::ZeroToMax,
        10,
        |p: &Passenger| p.fare,
    )));

    let mut surface = RecordingSurface::new();
    let mut now = Instant::now();

    println!("initial render");
    controller.update_all(now, &mut surface)?;
    now = settle(&mut controller, now, &mut surface);
    report(&controller, &surface);

    let script = [
        InteractionEvent::slice_clicked("sex", "female"),
        InteractionEvent::slice_clicked("survived", "yes"),
        InteractionEvent::control_changed("pclass", "3"),
        InteractionEvent::control_changed("pclass", ""),
        InteractionEvent::slice_clicked("sex", "female"),
        InteractionEvent::slice_clicked("survived", "yes"),
    ];
    for event in &script {
        println!("{:?}", event);
        controller.handle(event, now, &mut surface)?;
        now = settle(&mut controller, now, &mut surface);
        report(&controller, &surface);
    }

    println!("{} surface ops total", surface.ops().len());
    Ok(())
}
