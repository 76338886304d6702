//! Main robot-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Cycle clock advance
//!         - Simulated collaborator step
//!         - Operator input acquisition
//!         - Mode handling
//!         - Trigger binding poll (teleop only)
//!         - Scheduler cycle
//!         - Telemetry and archiving
//!
//! With no arguments the autonomous routine named in `auto.toml` is run for the autonomous
//! period. With a single argument the robot runs in teleop, driven by the operator input script
//! at that path.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use robot_lib::{
    arm_ctrl::ArmCtrlParams,
    auto::{AutoChooser, AutoParams},
    bindings::teleop_bindings,
    data_store::DataStore,
    motions::MotionParams,
    params::RobotExecParams,
    robot::RobotMode,
    sim::{Sim, SimParams},
};
use util::{
    archive::{Archived, Archiver},
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingInput, ScriptInterpreter},
    session::Session,
    time::{seconds_to_duration, Clock},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("robot_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Arm Interlock Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: RobotExecParams =
        util::params::load("robot_exec.toml").wrap_err("Could not load exec params")?;
    let arm_params: ArmCtrlParams =
        util::params::load("arm_ctrl.toml").wrap_err("Could not load arm control params")?;
    let motion_params: MotionParams =
        util::params::load("motions.toml").wrap_err("Could not load motion params")?;
    let auto_params: AutoParams =
        util::params::load("auto.toml").wrap_err("Could not load autonomous params")?;
    let sim_params: SimParams =
        util::params::load("sim.toml").wrap_err("Could not load simulation params")?;

    // Keep a record of exactly what this session ran with
    session.save("params/robot_exec.json", &exec_params);
    session.save("params/arm_ctrl.json", &arm_params);
    session.save("params/motions.json", &motion_params);
    session.save("params/auto.json", &auto_params);
    session.save("params/sim.json", &sim_params);

    info!("Exec parameters loaded");

    // ---- INITIALISE INPUT SOURCE ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let mut input_source = if args.len() == 2 {
        info!("Loading operator input script from \"{}\"", &args[1]);

        let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

        info!(
            "Loaded script lasts {:.02} s and contains {} frames\n",
            si.get_duration(),
            si.get_num_frames()
        );

        InputSource::Script(si)
    } else if args.len() == 1 {
        info!("No script provided, running the autonomous routine\n");
        InputSource::Autonomous
    } else {
        return Err(eyre!(
            "Expected either zero or one argument, found {}",
            args.len() - 1
        ));
    };

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let cycle_period = seconds_to_duration(exec_params.cycle_period_s);
    if cycle_period == Duration::default() {
        return Err(eyre!(
            "Cycle period must be positive, found {} s",
            exec_params.cycle_period_s
        ));
    }

    let sim = Sim::new(&sim_params);
    let robot = sim.robot(arm_params, Clock::new(cycle_period));
    info!("Simulated collaborators initialised");

    let bindings = teleop_bindings(&motion_params, &exec_params.teleop);
    info!("{} teleop bindings registered", bindings.len());

    let mut ds = DataStore::new(robot, bindings);

    if exec_params.archive_tm {
        ds.arch_arm_tm = Archiver::from_path(&session, "arm_tm.csv")
            .map_err(|e| eyre!("Failed to create the telemetry archive: {}", e))?;
        info!("Telemetry archive initialised");
    }

    info!("Module initialisation complete\n");

    // ---- START MODE ----

    match input_source {
        InputSource::Autonomous => {
            let chooser = AutoChooser::new(motion_params.clone(), auto_params.clone())
                .wrap_err("Failed to initialise the autonomous chooser")?;
            let routine = chooser
                .select_default()
                .wrap_err("Failed to build the autonomous routine")?;

            info!(
                "Running \"{}\" for {:.1} s",
                chooser.default_name(),
                auto_params.period_s
            );
            ds.start_auto(routine, auto_params.period_s);
        }
        InputSource::Script(_) => ds.set_mode(RobotMode::Teleop),
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- SIMULATION ----

        sim.step(cycle_period.as_secs_f64());

        // ---- OPERATOR INPUT ----

        match input_source {
            InputSource::Script(ref mut si) => {
                match si.get_pending(ds.robot.clock.elapsed_s()) {
                    PendingInput::None => (),
                    PendingInput::Some(input) => ds.robot.input = input,
                    // Exit if end of script reached
                    PendingInput::EndOfScript => {
                        info!("End of operator input script reached, stopping");
                        break;
                    }
                }
            }
            InputSource::Autonomous => (),
        }

        // ---- MODE HANDLING ----

        ds.proc_mode();

        if ds.robot.mode == RobotMode::Disabled {
            info!("Robot disabled, stopping");
            break;
        }

        // ---- ACTION PROCESSING ----

        ds.proc_actions();

        // ---- TELEMETRY ----

        ds.cycle_end();

        if let Err(e) = ds.write() {
            warn!("Could not archive telemetry: {}", e);
        }

        if ds.is_1_hz_cycle {
            if let Some(ref tm) = ds.arm_tm {
                info!(
                    "{:.2} s: extension {:.2} in, tilt {:.2} in, vacuum seal {}, steps [{}]",
                    tm.time_s, tm.extension_in, tm.tilt_in, tm.vacuum_seal, tm.active_steps
                );
            }
        }

        // ---- CYCLE MANAGEMENT ----

        if !exec_params.realtime {
            continue;
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }
    }

    // ---- SHUTDOWN ----

    ds.set_mode(RobotMode::Disabled);

    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Sources of operator input for the exec.
enum InputSource {
    /// No operator, the autonomous routine runs alone
    Autonomous,

    /// Operator input replayed from a script
    Script(ScriptInterpreter),
}
