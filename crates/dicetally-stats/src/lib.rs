//! Roll statistics for dice-based board games.
//!
//! Every function here is a pure transformation of a chronologically ordered
//! roll slice; nothing is cached between calls. Queries that need more data
//! than available return `None` rather than failing.
//!
//! # Modules
//!
//! - [`distribution`]: Frequency of each sum, optionally split by event die
//! - [`expected`]: Theoretical distribution of two fair dice
//! - [`fairness`]: Observed versus expected counts with a chi-square statistic
//! - [`outliers`]: Hot and cold numbers
//! - [`streak`]: Longest run of equal sums
//! - [`timing`]: Time between rolls
//! - [`descriptive`]: Descriptive statistics used by the timing analysis
//! - [`summary`]: All of the above over one snapshot
//!
//! # Examples
//!
//! ## Building a distribution
//!
//! ```
//! use dicetally_core::RollRecord;
//! use dicetally_stats::distribution::{DistributionMode, SumDistribution};
//!
//! let rolls = [(2, 5), (6, 1), (4, 4)].map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
//! let dist = SumDistribution::build(&rolls, DistributionMode::Simple);
//!
//! assert_eq!(dist.dense_counts()[5], 2); // sum 7
//! ```
//!
//! ## Finding hot and cold numbers
//!
//! ```
//! use dicetally_core::RollRecord;
//! use dicetally_stats::{
//!     distribution::{DistributionMode, SumDistribution},
//!     outliers::Outliers,
//! };
//!
//! let rolls = [(2, 5), (6, 1), (4, 4)].map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
//! let dist = SumDistribution::build(&rolls, DistributionMode::Simple);
//! let outliers = Outliers::from_distribution(&dist).unwrap();
//!
//! assert_eq!(outliers.hot_number.sum.value(), 7);
//! assert_eq!(outliers.cold_number.sum.value(), 8);
//! ```
//!
//! ## Summarizing a game
//!
//! ```
//! use dicetally_core::{Game, GameLog, RollRecord};
//! use dicetally_stats::summary::RollStatistics;
//!
//! let game = Game::new("g1", "Test", ["Ana", "Bo"], false, 0).unwrap();
//! let mut log = GameLog::new(game);
//! log.push_roll(RollRecord::new(3, 3, None, 1_000).unwrap()).unwrap();
//! log.push_roll(RollRecord::new(5, 1, None, 4_000).unwrap()).unwrap();
//!
//! let stats = RollStatistics::for_game(&log);
//! assert_eq!(stats.longest_streak.unwrap().length, 2);
//! assert_eq!(stats.mean_inter_roll_ms, Some(3_000.0));
//! ```

pub mod descriptive;
pub mod distribution;
pub mod expected;
pub mod fairness;
pub mod outliers;
pub mod streak;
pub mod summary;
pub mod timing;
