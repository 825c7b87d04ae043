use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use inspira_core::config::{EngineSettings, StopWords};

/// Tokens shorter than this are dropped before n-grams are formed.
const MIN_TOKEN_CHARS: usize = 2;

/// English stop words removed before n-grams are built.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
	"a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also","although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
	"back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below","beside","besides","between","beyond","bill","both","bottom","but","by",
	"call","can","cannot","cant","co","con","could","couldnt","cry","de","describe","detail","do","done","down","due","during",
	"each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone","everything","everywhere","except",
	"few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from","front","full","further",
	"get","give","go","had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him","himself","his","how","however","hundred",
	"i","ie","if","in","inc","indeed","interest","into","is","it","its","itself","keep","last","latter","latterly","least","less","ltd",
	"made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my","myself",
	"name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now","nowhere",
	"of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
	"part","per","perhaps","please","put","rather","re","same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere","six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
	"take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through","throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
	"un","under","until","up","upon","us","very","via","was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
	"yet","you","your","yours","yourself","yourselves",
];

/// Splits text on non-alphanumeric characters, lowercases, removes stop
/// words and emits word n-grams over what is left.
#[derive(Clone)]
pub struct Analyzer {
	tokenizer: TextAnalyzer,
	ngram_range: (usize, usize),
}

impl Analyzer {
	pub fn new(ngram_range: (usize, usize), stop_words: StopWords) -> Self {
		let words: Vec<String> = match stop_words {
			StopWords::English => ENGLISH_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
			StopWords::None => Vec::new(),
		};
		let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(words))
			.build();
		let min_n = ngram_range.0.max(1);
		Self { tokenizer, ngram_range: (min_n, ngram_range.1.max(min_n)) }
	}

	pub fn from_settings(settings: &EngineSettings) -> Self {
		Self::new((settings.ngram_min, settings.ngram_max), settings.stop_words)
	}

	pub fn ngram_range(&self) -> (usize, usize) { self.ngram_range }

	/// Filtered single-word tokens, in text order.
	pub fn tokens(&self, text: &str) -> Vec<String> {
		let mut tokenizer = self.tokenizer.clone();
		let mut stream = tokenizer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() {
			let token = &stream.token().text;
			if token.chars().count() >= MIN_TOKEN_CHARS { tokens.push(token.clone()); }
		}
		tokens
	}

	/// All n-grams in the configured range, joined with a single space.
	pub fn terms(&self, text: &str) -> Vec<String> {
		let tokens = self.tokens(text);
		let (min_n, max_n) = self.ngram_range;
		let mut terms = Vec::new();
		for n in min_n..=max_n {
			terms.extend(tokens.windows(n).map(|window| window.join(" ")));
		}
		terms
	}
}

impl Default for Analyzer {
	fn default() -> Self { Self::from_settings(&EngineSettings::default()) }
}
