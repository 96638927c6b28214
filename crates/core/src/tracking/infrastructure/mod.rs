pub mod replay_tracker;
