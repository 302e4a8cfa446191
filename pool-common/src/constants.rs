//! Constants used throughout the shielded pool

use ruint::{aliases::U256, uint};

/// The order of the BN254 scalar field, in which challenges & evaluations live
pub const SCALAR_MODULUS: U256 = uint!(
    21888242871839275222246405745257275088548364400416034343698204186575808495617_U256
);

/// The order of the BN254 base field, over which curve coordinates are defined
pub const BASE_MODULUS: U256 = uint!(
    21888242871839275222246405745257275088696311157297823662689037894645226208583_U256
);

/// The number of bytes in a serialized field element
pub const NUM_BYTES_FELT: usize = 32;

/// The number of bytes in a serialized G1 point
pub const NUM_BYTES_G1: usize = 2 * NUM_BYTES_FELT;

/// The number of bytes in a serialized G2 point
pub const NUM_BYTES_G2: usize = 4 * NUM_BYTES_FELT;

/// The number of G1 commitments in a proof
pub const NUM_PROOF_COMMITMENTS: usize = 9;

/// The number of polynomial evaluations in a proof
pub const NUM_PROOF_EVALS: usize = 7;

/// The byte offset at which the evaluations begin in a serialized proof
pub const PROOF_EVALS_OFFSET: usize = NUM_PROOF_COMMITMENTS * NUM_BYTES_G1;

/// The number of bytes in a serialized proof
pub const PROOF_LEN: usize = PROOF_EVALS_OFFSET + NUM_PROOF_EVALS * NUM_BYTES_FELT;

/// The number of opening challenges (`v`) squeezed from the transcript
pub const NUM_OPENING_CHALLENGES: usize = 6;

/// The number of public inputs to the withdrawal circuit
/// (root, nullifier hash, recipient)
pub const NUM_WITHDRAWAL_PUBLIC_INPUTS: usize = 3;

/// The number of bytes output by the transcript hash
pub const HASH_OUTPUT_SIZE: usize = 32;

/// The largest `log2` domain size the BN254 scalar field supports
pub const MAX_DOMAIN_POWER: u32 = 28;

/// The height of each scope's commitment tree
pub const MERKLE_HEIGHT: usize = 31;

/// The x-coordinate limbs of the BN254 G2 generator, `x = x1 + x2 * u`
pub const G2_GENERATOR_X: [U256; 2] = [
    uint!(10857046999023057135944570762232829481370756359578518086990519993285655852781_U256),
    uint!(11559732032986387107991004021392285783925812861821192530917403151452391805634_U256),
];

/// The y-coordinate limbs of the BN254 G2 generator, `y = y1 + y2 * u`
pub const G2_GENERATOR_Y: [U256; 2] = [
    uint!(8495653923123431417604973247489272438418190587263600148770280649306958101930_U256),
    uint!(4082367875863433681332203403145435568316851327593401208105741076214120093531_U256),
];

/// The value of an empty subtree at each level of a commitment tree, starting
/// from the leaves.
///
/// Several of these exceed the scalar modulus, they are reduced before use.
pub const LEVEL_DEFAULTS: [U256; 32] = [
    uint!(30238598704088929952843927706569847911599885956104611274912160341490286246718_U256),
    uint!(25348422377004321007059927731081793746945139569114277883447014548301570270860_U256),
    uint!(16401820946464185137346357874373090990568111992633083038764169830345921227085_U256),
    uint!(7508103525080351137382699802863531575643180572162613318007798684988341228268_U256),
    uint!(17960896985569549954477100205393164871173002812946988710438960683597028440922_U256),
    uint!(29464911409920719015583702742677733245455761112275208147876304472374171736419_U256),
    uint!(20365738626542439140784808616660262904197432804351602887389291635706005230479_U256),
    uint!(50094012655666739741757742535708299725511612220888959669209674245779430795631_U256),
    uint!(84481084991077554297473579297547823130151822028357513698940834088946031994428_U256),
    uint!(65009568646014927574600477453219176146218298364363007468316186649830384869270_U256),
    uint!(74568519575760023398099891318741317344911244404916721780423199270529518060223_U256),
    uint!(28474002570249281395440345236610297023194847909993280485202899395592828940126_U256),
    uint!(40230313923982849562834343028524642933574573334910634629678156674487064379057_U256),
    uint!(16463665069615288234635515866443739209783239800818597114164287502048789052464_U256),
    uint!(39326964221197219404313764098995068225350845039661696346190141178267408599237_U256),
    uint!(56128881384580835253363759507703601545282399300749662091723162625648919231395_U256),
    uint!(71651674210086931308216423199077829219568676225701481144725097391774503208581_U256),
    uint!(11291812394179869221746248061886328562378471618543727288534038397673199316212_U256),
    uint!(91768241568601166219390796547719868152960074702606000299649710606134403570387_U256),
    uint!(113866854053749903300333619484139229603952452549894060841070478621193462325348_U256),
    uint!(12900939506777163752908550726884953820264260341613592165124627336667450505012_U256),
    uint!(77792729128822647523914437850871477814352129948361548129548545876643770001468_U256),
    uint!(8550899905673560156874502538901844408321725334814212168646676121448800494749_U256),
    uint!(68075794184097345106241543125282550400004595546658124757342479691208462448155_U256),
    uint!(52051519765640516569026227651220681577251574921757729650704331930922152451705_U256),
    uint!(60439906622495289412129553804980598395101411861085333741828968014406524398960_U256),
    uint!(43838341704056268159122126764160763495039233876411520978708515517865358045820_U256),
    uint!(20769327482353150733803221965915847256410246352105945946711490529511199296334_U256),
    uint!(90854336653446787628791047493176183662724257943649508657425729023284934684385_U256),
    uint!(104113848206815522990854469768913042028817956314155575532193413111187726944706_U256),
    uint!(99687557887186228995941237085927827806810202766788290430077136634416942660613_U256),
    uint!(7333656426618417692843107199562353793827654602322450949288455009300229501943_U256),
];
