use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command};
use csv::{ReaderBuilder, Trim};
use log::{error, info};

use schedsim::constants::{
    scheduling_demo_workload, stepper_demo_workload, AUTO_ADVANCE_INTERVAL, DEADLOCK_STEP_INTERVAL,
    DEFAULT_RR_QUANTUM,
};
use schedsim::models::deadlock::{Contender, ContenderStatus};
use schedsim::models::ticker::Observer;
use schedsim::scheduler::Quantum;
use schedsim::{
    simulation, Algorithm, AutoAdvance, DeadlockScenario, DeadlockSnapshot, LoadError,
    ProcessDescriptor, Stepper, StepperSnapshot, Timeline, Workload,
};

const EXIT_INVALID_INPUT: i32 = 2;

/// Reads a workload file: one `id, burst[, arrival]` row per process, no header.
pub fn read_workload_file(file_path: &str) -> Result<Vec<ProcessDescriptor>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(file_path)?;

    let mut descriptors = Vec::new();
    for result in rdr.deserialize() {
        let descriptor: ProcessDescriptor = result?;
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

pub fn build_cli_command() -> Command {
    Command::new("schedsim")
        .version("0.1.0")
        .about("Simulates CPU scheduling algorithms on a small workload")
        .arg(
            Arg::new("workload_file")
                .help("CSV file with `id, burst[, arrival]` rows (built-in demo workload if omitted)"),
        )
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .help("Algorithm to simulate")
                .value_parser(["fcfs", "sjf", "priority", "rr", "mlfq", "all"])
                .default_value("all"),
        )
        .arg(
            Arg::new("quantum")
                .short('q')
                .long("quantum")
                .help("Round Robin time quantum")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("3"),
        )
        .arg(
            Arg::new("step")
                .short('s')
                .long("step")
                .help("Replay FCFS tick by tick instead of printing timelines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("deadlock")
                .short('d')
                .long("deadlock")
                .help("Replay how two processes deadlock over two resources")
                .action(ArgAction::SetTrue)
                .conflicts_with("step"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .help("Milliseconds between two ticks in step or deadlock mode (850 / 1200 if omitted)")
                .value_parser(clap::value_parser!(u64)),
        )
}

fn load_descriptors(matches: &ArgMatches, default: fn() -> Vec<ProcessDescriptor>) -> Result<Vec<ProcessDescriptor>, LoadError> {
    match matches.get_one::<String>("workload_file") {
        Some(path) => {
            info!("loading workload from {}", path);
            read_workload_file(path)
        }
        None => Ok(default()),
    }
}

fn selected_algorithms(matches: &ArgMatches) -> Result<Vec<Algorithm>, LoadError> {
    match matches.get_one::<String>("algorithm").map(String::as_str) {
        None | Some("all") => Ok(Algorithm::ALL.to_vec()),
        Some(id) => Ok(vec![id.parse::<Algorithm>()?]),
    }
}

fn tick_interval(matches: &ArgMatches, default: Duration) -> Duration {
    matches
        .get_one::<u64>("interval")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or(default)
}

fn render_timeline(algorithm: Algorithm, timeline: &Timeline) -> String {
    let mut out = format!("{} ({})\n", algorithm.name(), algorithm.summary());
    for interval in timeline {
        out.push_str(&format!(
            "  {:<6} {:>3} -> {:>3}  {}\n",
            interval.process_id(),
            interval.start(),
            interval.end(),
            "#".repeat(interval.duration())
        ));
    }
    out.push_str(&format!("  makespan: {}\n", timeline.makespan()));
    out
}

fn render_snapshot(snapshot: &StepperSnapshot) -> String {
    let processes: Vec<String> = snapshot
        .processes
        .iter()
        .map(|p| format!("{}:{}", p.id, p.remaining))
        .collect();
    let last_event = snapshot.event_log.last().map(String::as_str).unwrap_or("");
    format!(
        "t={:>3}s  [{}]  {}",
        snapshot.elapsed_time,
        processes.join(" "),
        last_event
    )
}

fn render_deadlock(snapshot: &DeadlockSnapshot) -> String {
    fn status(status: ContenderStatus) -> &'static str {
        match status {
            ContenderStatus::Idle => "idle",
            ContenderStatus::Running => "running",
            ContenderStatus::Blocked => "blocked",
        }
    }
    fn holder(holder: Option<Contender>) -> String {
        holder.map_or_else(|| "free".to_string(), |c| c.to_string())
    }
    fn flag(met: bool, tag: &str) -> &str {
        if met {
            tag
        } else {
            "--"
        }
    }

    let conditions = &snapshot.conditions;
    let mut out = format!(
        "step {}/{}  P1:{} P2:{}  R1:{} R2:{}  [{} {} {} {}]",
        snapshot.step,
        DeadlockScenario::step_count(),
        status(snapshot.p1),
        status(snapshot.p2),
        holder(snapshot.r1_holder),
        holder(snapshot.r2_holder),
        flag(conditions.mutual_exclusion, "ME"),
        flag(conditions.hold_and_wait, "HW"),
        flag(conditions.no_preemption, "NP"),
        flag(conditions.circular_wait, "CW"),
    );
    if let Some(description) = snapshot.description {
        out.push_str("  ");
        out.push_str(description);
    }
    if snapshot.is_deadlocked {
        out.push_str("\nDeadlock! Each process waits forever.");
    }
    out
}

fn run_batch(matches: &ArgMatches) -> Result<(), LoadError> {
    let workload = Workload::new(load_descriptors(matches, scheduling_demo_workload)?)?;
    let quantum = Quantum::new(*matches.get_one::<i64>("quantum").unwrap_or(&(DEFAULT_RR_QUANTUM as i64)))?;

    for algorithm in selected_algorithms(matches)? {
        let timeline = simulation(algorithm, &workload, quantum);
        println!("{}", render_timeline(algorithm, &timeline));
    }
    Ok(())
}

fn run_stepper(matches: &ArgMatches) -> Result<(), LoadError> {
    let stepper = Stepper::new(load_descriptors(matches, stepper_demo_workload)?)?;
    let interval = tick_interval(matches, AUTO_ADVANCE_INTERVAL);

    println!("{}", render_snapshot(&stepper.snapshot()));
    let observer: Observer<StepperSnapshot> =
        Arc::new(|snapshot: &StepperSnapshot| println!("{}", render_snapshot(snapshot)));
    let mut auto = AutoAdvance::with_observer(Arc::new(Mutex::new(stepper)), observer);

    if auto.request_auto_advance(interval) {
        auto.wait();
    }
    Ok(())
}

fn run_deadlock(matches: &ArgMatches) {
    let scenario = DeadlockScenario::new();
    let interval = tick_interval(matches, DEADLOCK_STEP_INTERVAL);

    println!("{}", render_deadlock(&scenario.snapshot()));
    let observer: Observer<DeadlockSnapshot> =
        Arc::new(|snapshot: &DeadlockSnapshot| println!("{}", render_deadlock(snapshot)));
    let mut auto = AutoAdvance::with_observer(Arc::new(Mutex::new(scenario)), observer);

    if auto.request_auto_advance(interval) {
        auto.wait();
    }
}

fn main() {
    // cargo run -- [workload.csv] [-a fcfs|sjf|priority|rr|mlfq|all] [-q 3] [--step | --deadlock] [-i 850]
    env_logger::init();
    let matches: ArgMatches = build_cli_command().get_matches();

    let result = if matches.get_flag("deadlock") {
        run_deadlock(&matches);
        Ok(())
    } else if matches.get_flag("step") {
        run_stepper(&matches)
    } else {
        run_batch(&matches)
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(EXIT_INVALID_INPUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schedsim::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn workload_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Unable to create test file");
        file.write_all(content.as_bytes()).expect("Unable to write test file");
        file
    }

    #[test]
    fn test_read_workload_file_valid() {
        let file = workload_file("P1, 7, 0\nP2, 4, 1\n# comment\nP3, 5\n");

        let descriptors = read_workload_file(file.path().to_str().unwrap()).expect("Failed to read workload");
        assert_eq!(
            descriptors,
            vec![
                ProcessDescriptor::with_arrival("P1", 7, 0),
                ProcessDescriptor::with_arrival("P2", 4, 1),
                ProcessDescriptor::new("P3", 5),
            ]
        );
    }

    #[test]
    fn test_read_workload_file_invalid_format() {
        let file = workload_file("P1, seven");

        let result = read_workload_file(file.path().to_str().unwrap());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_non_positive_burst_reaches_validation() {
        let file = workload_file("P1, 3\nP2, -4\n");

        let descriptors = read_workload_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            Workload::new(descriptors),
            Err(ValidationError::NonPositiveBurst { id: "P2".into(), burst: -4 })
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(read_workload_file("does/not/exist.csv").is_err());
    }

    #[test]
    fn test_command_line_arguments() {
        let matches = build_cli_command()
            .try_get_matches_from(vec!["schedsim", "tasks.csv", "-a", "rr", "-q", "4"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("workload_file").unwrap(), "tasks.csv");
        assert_eq!(*matches.get_one::<i64>("quantum").unwrap(), 4);
        assert_eq!(selected_algorithms(&matches).unwrap(), vec![Algorithm::RoundRobin]);
        assert!(!matches.get_flag("step"));
    }

    #[test]
    fn test_command_line_defaults() {
        let matches = build_cli_command().try_get_matches_from(vec!["schedsim"]).unwrap();

        assert!(matches.get_one::<String>("workload_file").is_none());
        assert_eq!(*matches.get_one::<i64>("quantum").unwrap(), DEFAULT_RR_QUANTUM as i64);
        assert_eq!(tick_interval(&matches, AUTO_ADVANCE_INTERVAL), AUTO_ADVANCE_INTERVAL);
        assert_eq!(tick_interval(&matches, DEADLOCK_STEP_INTERVAL), DEADLOCK_STEP_INTERVAL);
        assert!(!matches.get_flag("deadlock"));
        assert_eq!(selected_algorithms(&matches).unwrap(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_command_line_accepts_negative_quantum() {
        let matches = build_cli_command()
            .try_get_matches_from(vec!["schedsim", "-q", "-2"])
            .unwrap();
        assert_eq!(*matches.get_one::<i64>("quantum").unwrap(), -2);
        assert!(run_batch(&matches).is_err());
    }

    #[test]
    fn test_command_line_deadlock_mode() {
        let matches = build_cli_command()
            .try_get_matches_from(vec!["schedsim", "--deadlock", "-i", "5"])
            .unwrap();
        assert!(matches.get_flag("deadlock"));
        assert_eq!(tick_interval(&matches, DEADLOCK_STEP_INTERVAL), Duration::from_millis(5));

        let both = build_cli_command().try_get_matches_from(vec!["schedsim", "--deadlock", "--step"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_command_line_rejects_unknown_algorithm() {
        let result = build_cli_command().try_get_matches_from(vec!["schedsim", "-a", "edf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_timeline() {
        let workload = Workload::new(vec![ProcessDescriptor::new("P1", 2), ProcessDescriptor::new("P2", 1)]).unwrap();
        let quantum = Quantum::new(1).unwrap();
        let rendered = render_timeline(Algorithm::Fcfs, &simulation(Algorithm::Fcfs, &workload, quantum));

        assert_eq!(
            rendered,
            "FCFS (First-Come, First-Served: no preemption, in arrival order.)\n  P1       0 ->   2  ##\n  P2       2 ->   3  #\n  makespan: 3\n"
        );
    }

    #[test]
    fn test_render_snapshot() {
        let mut stepper = Stepper::new(vec![ProcessDescriptor::new("P1", 2)]).unwrap();
        stepper.advance_one_time_unit();

        assert_eq!(render_snapshot(&stepper.snapshot()), "t=  1s  [P1:1]  t=0s ▶ P1 starts");
    }

    #[test]
    fn test_render_deadlock() {
        let mut scenario = DeadlockScenario::new();
        assert_eq!(
            render_deadlock(&scenario.snapshot()),
            "step 0/4  P1:idle P2:idle  R1:free R2:free  [-- -- NP --]"
        );

        for _ in 0..3 {
            scenario.step_forward();
        }
        assert_eq!(
            render_deadlock(&scenario.snapshot()),
            "step 3/4  P1:blocked P2:running  R1:P1 R2:P2  [ME HW NP --]  P1 now requests R2 (held by P2); P1 blocks"
        );

        scenario.step_forward();
        assert!(render_deadlock(&scenario.snapshot()).ends_with("[ME HW NP CW]  P2 requests R1 (held by P1); P2 blocks\nDeadlock! Each process waits forever."));
    }
}
